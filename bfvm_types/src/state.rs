use crate::instruction::Instruction;
use core::fmt;

// Snapshot taken after each executed instruction. Small enough to
// hand out on every step; useful for debugging and tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StepState {
    cell_value: u8,
    pointer: usize,
    next_pc: usize,
    executed: Instruction,
    steps: usize,
}

impl StepState {
    pub fn new(
        cell_value: u8,
        pointer: usize,
        next_pc: usize,
        executed: Instruction,
        steps: usize,
    ) -> Self {
        StepState {
            cell_value,
            pointer,
            next_pc,
            executed,
            steps,
        }
    }

    /// Value of the cell under the data pointer after the step.
    pub fn cell_value(&self) -> u8 {
        self.cell_value
    }

    /// Data pointer after the step.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Program counter the next step will execute.
    pub fn next_pc(&self) -> usize {
        self.next_pc
    }

    /// The instruction this step executed.
    pub fn executed(&self) -> Instruction {
        self.executed
    }

    /// Total instructions executed so far this run.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: {} -> pc {}, pointer {}, cell {}",
            self.steps, self.executed, self.next_pc, self.pointer, self.cell_value
        )
    }
}

/// Terminal state of a completed run: the whole tape, the final data
/// pointer, and the number of instructions executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalState {
    tape: Vec<u8>,
    pointer: usize,
    steps: usize,
}

impl FinalState {
    pub fn new(tape: Vec<u8>, pointer: usize, steps: usize) -> Self {
        FinalState {
            tape,
            pointer,
            steps,
        }
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn into_tape(self) -> Vec<u8> {
        self.tape
    }
}

impl fmt::Display for FinalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let non_zero_cells = self
            .tape
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(index, value)| format!("[{}, {}]", index, value))
            .collect::<Vec<String>>()
            .join(",");

        write!(
            f,
            "pointer {} after {} steps, non-zero cells: {}",
            self.pointer, self.steps, non_zero_cells
        )
    }
}
