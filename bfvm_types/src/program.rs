use crate::instruction::{Instruction, SourcedInstruction};
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;

/// Default ceiling on program length.
///
/// Traditionally interpreters for this language allocate a fixed
/// 80000-character program buffer; anything past it is dropped.
pub const DEFAULT_MAX_INSTRUCTIONS: usize = 80_000;

/// Reasons a program can fail to load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A `[` was never closed. Carries the earliest unmatched one.
    #[error("unmatched '[' at {0}")]
    UnmatchedOpenBracket(SourcedInstruction),
    /// A `]` appeared with no `[` open.
    #[error("unmatched ']' at {0}")]
    UnmatchedCloseBracket(SourcedInstruction),
    #[error("failed to read program source")]
    Read(#[from] std::io::Error),
}

impl LoadError {
    /// Instruction index the error was detected at, where one exists.
    pub fn position(&self) -> Option<usize> {
        match self {
            LoadError::UnmatchedOpenBracket(instruction)
            | LoadError::UnmatchedCloseBracket(instruction) => Some(instruction.index()),
            LoadError::Read(_) => None,
        }
    }
}

/// A resolved program: the instruction sequence plus a jump table
/// pairing every branch instruction with its partner.
///
/// Built once by [`Program::load`] and immutable afterwards, so a
/// single program may be shared read-only across concurrent runs.
#[derive(Debug)]
pub struct Program {
    instructions: Vec<SourcedInstruction>,
    // jump_table[i] is the partner index for branch instructions and
    // i itself for everything else.
    jump_table: Vec<usize>,
    truncated: bool,
}

impl Program {
    /// Reads raw source bytes, drops comment bytes, and resolves
    /// bracket pairs in a single pass.
    ///
    /// Scanning stops once `max_instructions` instructions have been
    /// kept; the program is then marked [truncated](Self::truncated)
    /// and only the prefix is resolved. Bracket matching uses an
    /// explicit stack of pending `[` positions, so loading is O(n)
    /// and every jump at run time is a table lookup.
    pub fn load<R: Read>(reader: R, max_instructions: usize) -> Result<Self, LoadError> {
        let mut instructions: Vec<SourcedInstruction> = Vec::new();
        let mut jump_table: Vec<usize> = Vec::new();
        let mut open_brackets: Vec<usize> = Vec::new();
        let mut truncated = false;

        // Scan raw bytes: comment bytes need not be valid UTF-8.
        let mut buffered = BufReader::new(reader);
        let mut line: Vec<u8> = Vec::new();
        let mut line_idx = 0;
        'scan: loop {
            line.clear();
            if buffered.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            for (col_idx, &b) in line.iter().enumerate() {
                let Some(instruction) = Instruction::from_byte(b) else {
                    continue;
                };
                if instructions.len() == max_instructions {
                    log::warn!(
                        "program exceeds the {}-instruction cap; executing the truncated prefix",
                        max_instructions
                    );
                    truncated = true;
                    break 'scan;
                }

                let index = instructions.len();
                let sourced = SourcedInstruction::new(instruction, line_idx, col_idx, index);
                jump_table.push(index);
                match instruction {
                    Instruction::BranchForwardIfZero => open_brackets.push(index),
                    Instruction::BranchBackIfNonZero => match open_brackets.pop() {
                        Some(open) => {
                            jump_table[open] = index;
                            jump_table[index] = open;
                        }
                        None => return Err(LoadError::UnmatchedCloseBracket(sourced)),
                    },
                    _ => {}
                }
                instructions.push(sourced);
            }
            line_idx += 1;
        }

        if let Some(&earliest) = open_brackets.first() {
            return Err(LoadError::UnmatchedOpenBracket(instructions[earliest]));
        }

        Ok(Program {
            instructions,
            jump_table,
            truncated,
        })
    }

    pub fn instructions(&self) -> &[SourcedInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Partner index for a branch instruction; `index` itself for any
    /// other instruction.
    pub fn jump_target(&self, index: usize) -> usize {
        self.jump_table[index]
    }

    /// Whether loading stopped at the instruction cap.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfvm_test_utils::{TestFile, TEST_PROGRAM_INSTRUCTIONS};
    use std::io::Cursor;

    fn load(source: &str) -> Result<Program, LoadError> {
        Program::load(Cursor::new(source), DEFAULT_MAX_INSTRUCTIONS)
    }

    #[test]
    fn empty_source_is_a_valid_zero_length_program() -> Result<(), LoadError> {
        let program = load("")?;
        assert!(program.is_empty());
        assert!(!program.truncated());
        Ok(())
    }

    #[test]
    fn comment_characters_are_dropped() -> Result<(), LoadError> {
        let program = load("add one: + (then emit it) .\n")?;
        let kept: Vec<Instruction> = program
            .instructions()
            .iter()
            .map(|i| i.instruction())
            .collect();
        assert_eq!(kept, vec![Instruction::Increment, Instruction::Output]);
        Ok(())
    }

    #[test]
    fn non_utf8_comment_bytes_are_dropped() -> Result<(), LoadError> {
        let source: Vec<u8> = vec![b'+', 0xff, b'+'];
        let program = Program::load(Cursor::new(source), DEFAULT_MAX_INSTRUCTIONS)?;
        assert_eq!(program.len(), 2);
        let kept: Vec<Instruction> = program
            .instructions()
            .iter()
            .map(|i| i.instruction())
            .collect();
        assert_eq!(kept, vec![Instruction::Increment, Instruction::Increment]);
        Ok(())
    }

    #[test]
    fn source_positions_survive_loading() -> Result<(), LoadError> {
        let program = load("comment line\n +\n")?;
        let plus = program.instructions()[0];
        assert_eq!(plus.instruction(), Instruction::Increment);
        assert_eq!(plus.line(), 2);
        assert_eq!(plus.column(), 2);
        assert_eq!(plus.index(), 0);
        Ok(())
    }

    #[test]
    fn lone_close_bracket_fails_at_position_zero() {
        match load("]") {
            Err(LoadError::UnmatchedCloseBracket(instruction)) => {
                assert_eq!(instruction.index(), 0);
                assert_eq!(instruction.line(), 1);
                assert_eq!(instruction.column(), 1);
            }
            other => panic!("expected UnmatchedCloseBracket, got {:?}", other),
        }
    }

    #[test]
    fn lone_open_bracket_fails_at_position_zero() {
        match load("[") {
            Err(LoadError::UnmatchedOpenBracket(instruction)) => {
                assert_eq!(instruction.index(), 0);
            }
            other => panic!("expected UnmatchedOpenBracket, got {:?}", other),
        }
    }

    #[test]
    fn earliest_unmatched_open_bracket_is_reported() {
        // Both brackets are unmatched; the first one is the diagnostic.
        match load("[+[") {
            Err(LoadError::UnmatchedOpenBracket(instruction)) => {
                assert_eq!(instruction.index(), 0);
            }
            other => panic!("expected UnmatchedOpenBracket, got {:?}", other),
        }
    }

    #[test]
    fn small_nestings_resolve_to_their_nested_partners() -> Result<(), LoadError> {
        // (source, expected partner for each instruction index)
        let cases: [(&str, &[usize]); 3] = [
            ("[[]]", &[3, 2, 1, 0]),
            ("[][]", &[1, 0, 3, 2]),
            ("[[][]]", &[5, 2, 1, 4, 3, 0]),
        ];
        for (source, partners) in cases {
            let program = load(source)?;
            for (index, &partner) in partners.iter().enumerate() {
                assert_eq!(
                    program.jump_target(index),
                    partner,
                    "wrong partner for index {} of {:?}",
                    index,
                    source
                );
            }
        }
        Ok(())
    }

    #[test]
    fn non_branch_instructions_map_to_themselves() -> Result<(), LoadError> {
        let program = load("+[-]")?;
        assert_eq!(program.jump_target(0), 0);
        assert_eq!(program.jump_target(2), 2);
        assert_eq!(program.jump_target(1), 3);
        assert_eq!(program.jump_target(3), 1);
        Ok(())
    }

    #[test]
    fn loading_stops_at_the_instruction_cap() -> Result<(), LoadError> {
        let source = "+".repeat(100);
        let program = Program::load(Cursor::new(source), 10)?;
        assert_eq!(program.len(), 10);
        assert!(program.truncated());
        Ok(())
    }

    #[test]
    fn program_at_the_cap_is_not_truncated() -> Result<(), LoadError> {
        let source = "+".repeat(10);
        let program = Program::load(Cursor::new(source), 10)?;
        assert_eq!(program.len(), 10);
        assert!(!program.truncated());
        Ok(())
    }

    #[test]
    fn truncation_stranding_an_open_bracket_fails_to_load() {
        // The cap cuts the program before the closing bracket.
        let result = Program::load(Cursor::new("[++++]"), 3);
        assert!(matches!(
            result,
            Err(LoadError::UnmatchedOpenBracket(instruction)) if instruction.index() == 0
        ));
    }

    #[test]
    fn loads_from_a_file_on_disk() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::load(TestFile::new()?, DEFAULT_MAX_INSTRUCTIONS)?;
        assert_eq!(program.len(), TEST_PROGRAM_INSTRUCTIONS);
        // "++[>++[>+<-]<-]": outer loop spans 2..=14, inner 6..=11.
        assert_eq!(program.jump_target(2), 14);
        assert_eq!(program.jump_target(14), 2);
        assert_eq!(program.jump_target(6), 11);
        assert_eq!(program.jump_target(11), 6);
        Ok(())
    }
}
