//! Dispatch errors

use sqlmeta_diagnostics::{
    Diagnostic, ErrorCode, SQM0100, SQM0101, SQM0102, SQM0103, SQM0104, ToDiagnostic,
};
use thiserror::Error;

/// Errors raised while declaring types or resolving handlers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Two or more equally specific handlers apply
    #[error(
        "Method lookup ambiguity for '{handler_name}' on {argument}: {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        handler_name: String,
        argument: String,
        candidates: Vec<String>,
    },

    /// No handler's parameter type is an ancestor of the argument within the root
    #[error("No '{handler_name}' handler applicable to {argument} under {root}")]
    NotFound {
        handler_name: String,
        argument: String,
        root: String,
    },

    /// A type was used before being declared in the hierarchy
    #[error("Type {0} is not declared in the type hierarchy")]
    UndeclaredType(String),

    /// A type was declared twice with different parents
    #[error("Type {name} is already declared with different parents")]
    DuplicateType { name: String },

    /// Two handlers with the same name share a parameter type
    #[error("Duplicate '{handler_name}' handler for parameter type {param}")]
    DuplicateHandler { handler_name: String, param: String },
}

/// Dispatch result
pub type DispatchResult<T> = Result<T, DispatchError>;

impl ToDiagnostic for DispatchError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Ambiguous { .. } => SQM0100,
            Self::NotFound { .. } => SQM0101,
            Self::UndeclaredType(_) => SQM0102,
            Self::DuplicateType { .. } => SQM0103,
            Self::DuplicateHandler { .. } => SQM0104,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code(), self.to_string());
        match self {
            Self::Ambiguous { candidates, .. } => candidates
                .iter()
                .fold(diagnostic, |diag, candidate| diag.with_related(candidate.clone())),
            _ => diagnostic,
        }
    }
}
