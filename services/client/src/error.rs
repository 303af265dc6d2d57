//! services/client/src/error.rs
//!
//! Defines the primary error type for the client service.

use crate::config::ConfigError;
use pairpad_core::ports::PortError;
use pairpad_core::validation::FieldErrors;
use pairpad_core::wizard::WizardError;

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("{0}")]
    Port(#[from] PortError),

    /// A form step or submission was refused locally.
    #[error("Form error: {0}")]
    Wizard(#[from] WizardError),

    /// Local validation failed before any request was sent.
    #[error("Please fix the errors: {0}")]
    Invalid(FieldErrors),

    /// Another action on the same target is still in flight.
    #[error("An action on {0} is already in progress")]
    Busy(String),

    /// The action needs a logged-in user.
    #[error("You need to log in first")]
    NotLoggedIn,

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
