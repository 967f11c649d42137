//! Type model errors

use sqlmeta_diagnostics::{ErrorCode, SQM0009, SQM0401, ToDiagnostic};
use thiserror::Error;

/// Errors raised by the type model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Two explicit character collations cannot be reconciled
    #[error("Invalid syntax. Two explicit different collations ({left}, {right}) are illegal")]
    DifferentCollations { left: String, right: String },

    /// Type system configuration could not be loaded
    #[error("Invalid type system configuration: {0}")]
    InvalidConfig(String),
}

/// Type model result
pub type TypeResult<T> = Result<T, TypeError>;

impl ToDiagnostic for TypeError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::DifferentCollations { .. } => SQM0009,
            Self::InvalidConfig(_) => SQM0401,
        }
    }
}
