use core::fmt;

// The eight executable operations. Anything else in the source text
// is a comment and never makes it into a program.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Instruction {
    MoveRight,           // >
    MoveLeft,            // <
    Increment,           // +
    Decrement,           // -
    Output,              // .
    Input,               // ,
    BranchForwardIfZero, // [
    BranchBackIfNonZero, // ]
}

impl Instruction {
    // All eight instruction symbols are ASCII, so the loader matches
    // raw bytes and never needs the source to be valid UTF-8.
    pub(crate) fn from_byte(b: u8) -> Option<Instruction> {
        match b {
            b'>' => Some(Instruction::MoveRight),
            b'<' => Some(Instruction::MoveLeft),
            b'+' => Some(Instruction::Increment),
            b'-' => Some(Instruction::Decrement),
            b'.' => Some(Instruction::Output),
            b',' => Some(Instruction::Input),
            b'[' => Some(Instruction::BranchForwardIfZero),
            b']' => Some(Instruction::BranchBackIfNonZero),
            _ => None,
        }
    }

    /// The source character this instruction was parsed from.
    pub fn symbol(self) -> char {
        match self {
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::BranchForwardIfZero => '[',
            Instruction::BranchBackIfNonZero => ']',
        }
    }
}

// Corresponding display strings
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveRight => write!(f, "Move Right (>)"),
            Instruction::MoveLeft => write!(f, "Move Left (<)"),
            Instruction::Increment => write!(f, "Increment (+)"),
            Instruction::Decrement => write!(f, "Decrement (-)"),
            Instruction::Output => write!(f, "Output (.)"),
            Instruction::Input => write!(f, "Input (,)"),
            Instruction::BranchForwardIfZero => write!(f, "Branch Forward If Zero ([)"),
            Instruction::BranchBackIfNonZero => write!(f, "Branch Back If Non-Zero (])"),
        }
    }
}

// An instruction together with where it sits: its index in the
// resolved sequence (the unit of program-counter addressing) and the
// line/column it was read from, kept for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SourcedInstruction {
    instruction: Instruction,
    line: usize,
    column: usize,
    index: usize,
}

impl SourcedInstruction {
    pub(crate) fn new(
        instruction: Instruction,
        line: usize,
        column: usize,
        index: usize,
    ) -> Self {
        SourcedInstruction {
            instruction,
            line: line + 1,
            column: column + 1,
            index,
        }
    }

    pub fn instruction(&self) -> Instruction {
        self.instruction
    }

    /// 1-based source line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based source column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Position in the resolved instruction sequence.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for SourcedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_byte_maps_every_instruction() {
        let pairs = [
            (b'>', Instruction::MoveRight),
            (b'<', Instruction::MoveLeft),
            (b'+', Instruction::Increment),
            (b'-', Instruction::Decrement),
            (b'.', Instruction::Output),
            (b',', Instruction::Input),
            (b'[', Instruction::BranchForwardIfZero),
            (b']', Instruction::BranchBackIfNonZero),
        ];
        for (b, instruction) in pairs {
            assert_eq!(Instruction::from_byte(b), Some(instruction));
            assert_eq!(instruction.symbol(), b as char);
        }
    }

    #[test]
    fn from_byte_rejects_comment_bytes() {
        for b in [b'a', b' ', b'\n', b'0', b'p', b'#', 0x00, 0xff] {
            assert_eq!(Instruction::from_byte(b), None);
        }
    }

    #[test]
    fn sourced_instruction_display() {
        let instruction = SourcedInstruction::new(Instruction::Increment, 0, 0, 0);
        assert_eq!(format!("{}", instruction), "1:1 Increment (+)");
    }
}
