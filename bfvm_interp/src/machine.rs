use crate::error::RunError;
use crate::stepper::Steps;
use crate::tape::Tape;
use bfvm_types::{FinalState, Instruction, Program, StepState};
use std::io::{self, Read, Write};
use std::sync::Arc;

/// Default cell count.
///
/// Traditionally tapes for this language come in 256- and 1024-cell
/// sizes; either is reachable through
/// [`crate::MachineBuilder::set_tape_size`].
pub const DEFAULT_TAPE_SIZE: usize = 256;

/// What a single [`Machine::step`] produced.
#[derive(Debug)]
pub enum StepOutcome {
    /// One instruction was executed; the snapshot describes the
    /// machine afterwards.
    Running(StepState),
    /// The program counter has left the program. No further steps
    /// will change the machine.
    Halted,
}

// A remembered terminal failure. Once set, the machine replays it
// from every later step instead of executing anything.
#[derive(Debug, Clone)]
enum Failure {
    StepBudgetExceeded {
        budget: usize,
        pc: usize,
        pointer: usize,
    },
    Io {
        kind: io::ErrorKind,
        message: String,
        pc: usize,
        pointer: usize,
    },
}

impl Failure {
    fn to_error(&self) -> RunError {
        match self {
            Failure::StepBudgetExceeded {
                budget,
                pc,
                pointer,
            } => RunError::StepBudgetExceeded {
                budget: *budget,
                pc: *pc,
                pointer: *pointer,
            },
            Failure::Io {
                kind,
                message,
                pc,
                pointer,
            } => RunError::Io {
                pc: *pc,
                pointer: *pointer,
                source: io::Error::new(*kind, message.clone()),
            },
        }
    }
}

/// The execution engine: owns the resolved program, the tape, the
/// cursor, and the byte streams for the duration of one run.
pub struct Machine {
    program: Arc<Program>,
    tape: Tape,
    pc: usize,
    input: Box<dyn Read>,
    output: Box<dyn Write>,
    steps: usize,
    step_budget: Option<usize>,
    failure: Option<Failure>,
}

impl Machine {
    pub(crate) fn new(
        program: Arc<Program>,
        tape: Tape,
        input: Box<dyn Read>,
        output: Box<dyn Write>,
        step_budget: Option<usize>,
    ) -> Self {
        Machine {
            program,
            tape,
            pc: 0,
            input,
            output,
            steps: 0,
            step_budget,
            failure: None,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Program counter of the next instruction.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Instructions executed so far.
    pub fn steps_executed(&self) -> usize {
        self.steps
    }

    /// Whether the machine has entered the Failed state.
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Executes one instruction.
    ///
    /// Returns [`StepOutcome::Halted`] once the program counter has
    /// left the program; calling again after that is a no-op. Fails
    /// if the step budget runs out or a byte stream breaks, and the
    /// failure is terminal: every later call repeats the error
    /// without executing anything.
    pub fn step(&mut self) -> Result<StepOutcome, RunError> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        if self.pc >= self.program.len() {
            return Ok(StepOutcome::Halted);
        }
        if let Some(budget) = self.step_budget {
            if self.steps >= budget {
                return Err(self.fail(Failure::StepBudgetExceeded {
                    budget,
                    pc: self.pc,
                    pointer: self.tape.pointer(),
                }));
            }
        }

        let sourced = self.program.instructions()[self.pc];
        let instruction = sourced.instruction();
        log::trace!("executing {}", sourced);

        // Branches overwrite this with their partner's index.
        let mut next_pc = self.pc + 1;
        match instruction {
            Instruction::MoveRight => self.tape.move_right(),
            Instruction::MoveLeft => self.tape.move_left(),
            Instruction::Increment => self.tape.increment(),
            Instruction::Decrement => self.tape.decrement(),
            Instruction::Output => self.write_cell()?,
            Instruction::Input => self.read_cell()?,
            Instruction::BranchForwardIfZero => {
                if self.tape.current() == 0 {
                    next_pc = self.program.jump_target(self.pc);
                }
            }
            Instruction::BranchBackIfNonZero => {
                if self.tape.current() != 0 {
                    next_pc = self.program.jump_target(self.pc);
                }
            }
        }

        self.steps += 1;
        self.pc = next_pc;

        Ok(StepOutcome::Running(StepState::new(
            self.tape.current(),
            self.tape.pointer(),
            self.pc,
            instruction,
            self.steps,
        )))
    }

    /// Runs the program to completion, returning the final tape and
    /// data pointer.
    pub fn run(&mut self) -> Result<FinalState, RunError> {
        loop {
            match self.step()? {
                StepOutcome::Running(_) => {}
                StepOutcome::Halted => {
                    self.output.flush().map_err(|source| self.io_error(source))?;
                    return Ok(FinalState::new(
                        self.tape.cells().to_vec(),
                        self.tape.pointer(),
                        self.steps,
                    ));
                }
            }
        }
    }

    /// Iterator over per-step snapshots, ending when the program
    /// halts.
    pub fn steps(&mut self) -> Steps<'_> {
        Steps::new(self)
    }

    // Write the current cell to the output sink as a single byte.
    fn write_cell(&mut self) -> Result<(), RunError> {
        let byte = [self.tape.current()];
        self.output
            .write_all(&byte)
            .map_err(|source| self.io_error(source))
    }

    // Read one byte from the input source into the current cell. At
    // end-of-input the cell is left unchanged.
    fn read_cell(&mut self) -> Result<(), RunError> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    self.tape.set_current(byte[0]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(self.io_error(source)),
            }
        }
    }

    // Record a terminal failure and hand back the error for it.
    fn fail(&mut self, failure: Failure) -> RunError {
        let error = failure.to_error();
        self.failure = Some(failure);
        error
    }

    fn io_error(&mut self, source: io::Error) -> RunError {
        self.failure = Some(Failure::Io {
            kind: source.kind(),
            message: source.to_string(),
            pc: self.pc,
            pointer: self.tape.pointer(),
        });
        RunError::Io {
            pc: self.pc,
            pointer: self.tape.pointer(),
            source,
        }
    }
}
