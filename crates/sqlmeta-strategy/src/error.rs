//! Strategy errors

use sqlmeta_diagnostics::{
    Diagnostic, ErrorCode, SQM0001, SQM0002, SQM0003, SQM0004, SQM0005, SQM0006, SQM0007,
    SQM0008, SQM0010, SQM0011, SQM0012, SQM0400, ToDiagnostic,
};
use sqlmeta_types::TypeError;
use thiserror::Error;

/// A checker rejected an operand's shape, type or value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Operand types match none of the operator's signatures
    #[error("Cannot apply '{operator}' to arguments of type {actual}{}", supported_forms(.allowed))]
    Signature {
        operator: String,
        actual: String,
        allowed: String,
    },

    #[error("Invalid number of arguments to function '{operator}'. Was expecting {expected} arguments")]
    WrongArgCount {
        operator: String,
        expected: String,
        actual: usize,
    },

    #[error("Illegal use of 'NULL'")]
    NullIllegal,

    #[error("Argument to function '{operator}' must be a literal")]
    ArgumentMustBeLiteral { operator: String },

    #[error("Argument to function '{operator}' must not be NULL")]
    ArgumentMustNotBeNull { operator: String },

    #[error("Argument to function '{operator}' must be a positive integer literal")]
    ArgumentMustBePositiveInteger { operator: String },

    #[error("Parameters must be of the same type")]
    NeedSameTypeParameter,

    #[error("Cannot compare values of types '{left}', '{right}'")]
    TypeNotComparable { left: String, right: String },

    #[error("Column count mismatch in {operator}")]
    ColumnCountMismatch { operator: String },

    #[error("Type mismatch in column {column} of {operator}")]
    ColumnTypeMismatch { operator: String, column: usize },

    #[error("Result precision of '{operator}' exceeds {max}")]
    PrecisionOverflow { operator: String, max: u32 },
}

fn supported_forms(allowed: &str) -> String {
    if allowed.is_empty() {
        String::new()
    } else {
        format!(". Supported form(s): {}", allowed)
    }
}

impl ToDiagnostic for ValidationError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Signature { .. } => SQM0001,
            Self::WrongArgCount { .. } => SQM0002,
            Self::NullIllegal => SQM0003,
            Self::ArgumentMustBeLiteral { .. } => SQM0004,
            Self::ArgumentMustNotBeNull { .. } => SQM0005,
            Self::ArgumentMustBePositiveInteger { .. } => SQM0006,
            Self::NeedSameTypeParameter => SQM0007,
            Self::TypeNotComparable { .. } => SQM0008,
            Self::ColumnCountMismatch { .. } => SQM0010,
            Self::ColumnTypeMismatch { .. } => SQM0011,
            Self::PrecisionOverflow { .. } => SQM0012,
        }
    }
}

/// Errors raised by checkers and inference strategies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Type(#[from] TypeError),

    /// The caller violated a strategy's contract
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StrategyError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Type(_))
    }
}

impl ToDiagnostic for StrategyError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(err) => err.code(),
            Self::Type(err) => err.code(),
            Self::Internal(_) => SQM0400,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string())
    }
}

/// Strategy result
pub type StrategyResult<T> = Result<T, StrategyError>;
