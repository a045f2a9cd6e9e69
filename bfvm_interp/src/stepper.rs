use crate::error::RunError;
use crate::machine::{Machine, StepOutcome};
use bfvm_types::{FinalState, StepState};

// Step-by-step execution of a machine, yielding the state after each
// instruction. Particularly useful for debugging.
pub struct Steps<'a> {
    machine: &'a mut Machine,
    final_state: Option<FinalState>,
    failed: bool,
}

impl<'a> Steps<'a> {
    pub(crate) fn new(machine: &'a mut Machine) -> Self {
        Steps {
            machine,
            final_state: None,
            failed: false,
        }
    }

    /// Terminal state, populated once the iterator has returned
    /// `None`.
    pub fn final_state(&self) -> Option<&FinalState> {
        self.final_state.as_ref()
    }
}

// Ends the iteration (returning None) once the machine halts; errors
// are yielded like any other item and the iterator is then spent.
impl Iterator for Steps<'_> {
    type Item = Result<StepState, RunError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.final_state.is_some() {
            return None;
        }
        match self.machine.step() {
            Ok(StepOutcome::Running(state)) => Some(Ok(state)),
            Ok(StepOutcome::Halted) => {
                self.final_state = Some(FinalState::new(
                    self.machine.tape().cells().to_vec(),
                    self.machine.tape().pointer(),
                    self.machine.steps_executed(),
                ));
                None
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
