//! # Execution Engine
//!
//! Interprets a resolved [`bfvm_types::Program`] against a bounded,
//! toroidal tape of wrapping byte cells and a pluggable pair of byte
//! streams. Machines are configured through [`MachineBuilder`] and
//! driven either to completion with [`Machine::run`] or one
//! instruction at a time with [`Machine::step`].
//!
//! Every machine owns its tape and cursor, so independent runs of a
//! shared program may proceed concurrently.

pub mod builder;
pub mod error;
pub mod machine;
pub mod stepper;
pub mod tape;

pub use builder::{BuildError, MachineBuilder};
pub use error::RunError;
pub use machine::{Machine, StepOutcome, DEFAULT_TAPE_SIZE};
pub use stepper::Steps;
pub use tape::Tape;
