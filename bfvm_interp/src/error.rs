use std::io;
use thiserror::Error;

/// Failures that end a run early. Pointer and cell wraparound are
/// defined behavior, so neither appears here; every error carries the
/// last valid cursor state for diagnostics.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configured step budget ran out, which usually means the
    /// program loops forever.
    #[error(
        "step budget of {budget} exhausted at instruction {pc} (data pointer {pointer}); \
         likely an infinite loop"
    )]
    StepBudgetExceeded {
        budget: usize,
        pc: usize,
        pointer: usize,
    },
    /// One of the byte streams failed. End-of-input is not an error;
    /// this is reserved for real I/O failures.
    #[error("I/O failure at instruction {pc} (data pointer {pointer})")]
    Io {
        pc: usize,
        pointer: usize,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    /// Program counter at the point of failure.
    pub fn pc(&self) -> usize {
        match self {
            RunError::StepBudgetExceeded { pc, .. } | RunError::Io { pc, .. } => *pc,
        }
    }

    /// Data pointer at the point of failure.
    pub fn pointer(&self) -> usize {
        match self {
            RunError::StepBudgetExceeded { pointer, .. } | RunError::Io { pointer, .. } => *pointer,
        }
    }
}
