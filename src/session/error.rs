use thiserror::Error;

/// Session-flow errors. None of these are fatal: validation failures
/// surface as a warning toast, missing targets are skipped silently, and
/// invalid transitions leave state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Please complete all required fields before continuing.")]
    ValidationFailure,

    #[error("Target not found: {0}")]
    MissingTarget(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

impl FlowError {
    pub fn invalid(action: &'static str, state: &'static str) -> Self {
        FlowError::InvalidTransition { action, state }
    }
}
