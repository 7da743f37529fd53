//! Error types for building instances.
//!
//! Every failure the crate can report is a variant of `FactoryError`.
//! They all describe misuse (bad seeds, unknown or duplicated states,
//! arguments a constructor cannot accept) and are raised at the call that
//! caused them.

use crate::state_name::StateName;
use thiserror::Error;

/// Errors that can occur while defining builders or making instances.
///
/// # Examples
///
/// ```rust
/// use dashing::{FactoryError, StateName};
///
/// let err = FactoryError::UnknownState(StateName::new("defeated"));
/// assert_eq!(err.to_string(), "No state registered under name defeated");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FactoryError {
    /// A seed was created from something that is not an argument list.
    ///
    /// Contains the kind of value that was received.
    #[error("Seed must be an array or a function returning an array, got {0}")]
    InvalidSeed(String),

    /// A state was applied that was never registered.
    #[error("No state registered under name {0}")]
    UnknownState(StateName),

    /// A state name was registered twice on the same builder.
    #[error("Cannot register state {0} twice")]
    DuplicateState(StateName),

    /// A build configuration was created without a default state.
    #[error("No default state passed")]
    MissingDefault,

    /// A constructor required an argument that was left unset.
    #[error("Missing argument at position {index}")]
    MissingArgument { index: usize },

    /// A constructor could not convert an argument to the type it needs.
    #[error("Invalid argument at position {index}: {message}")]
    InvalidArgument { index: usize, message: String },

    /// A constructor rejected its arguments for any other reason.
    #[error("Construction failed: {0}")]
    Construction(String),
}

/// Result type alias for builder operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_names_the_state() {
        let err = FactoryError::UnknownState(StateName::new("doesNotExist"));
        assert!(err.to_string().contains("doesNotExist"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = FactoryError::InvalidArgument {
            index: 2,
            message: "invalid type: string \"x\", expected u32".to_string(),
        };
        let display = err.to_string();
        assert!(display.starts_with("Invalid argument at position 2"));
        assert!(display.contains("expected u32"));
    }

    #[test]
    fn test_duplicate_state_display() {
        let err = FactoryError::DuplicateState(StateName::new("defeated"));
        assert_eq!(err.to_string(), "Cannot register state defeated twice");
    }
}
