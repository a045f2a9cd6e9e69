//! # Program Representation and Loading
//!
//! Types shared between the loader and the execution engine: the
//! eight-instruction set, resolved programs with their precomputed
//! jump tables, and machine-state snapshots.
//!
//! For more detailed examples and usage instructions, please refer to
//! the documentation of each module.

// The instruction set and source-position bookkeeping.
pub mod instruction;

// Loading raw source into a resolved, immutable program.
pub mod program;

// Snapshots of machine state, per step and at the end of a run.
pub mod state;

pub use instruction::{Instruction, SourcedInstruction};
pub use program::{LoadError, Program, DEFAULT_MAX_INSTRUCTIONS};
pub use state::{FinalState, StepState};
