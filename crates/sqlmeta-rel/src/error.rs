//! Relational-layer errors

use sqlmeta_diagnostics::{Diagnostic, ErrorCode, SQM0200, SQM0201, SQM0300, ToDiagnostic};
use sqlmeta_dispatch::DispatchError;
use thiserror::Error;

/// A collation does not fit the row type it is attached to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollationError {
    #[error("Collation references field {index} but the row type has {field_count} field(s)")]
    FieldIndexOutOfRange { index: usize, field_count: usize },
}

impl ToDiagnostic for CollationError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::FieldIndexOutOfRange { .. } => SQM0300,
        }
    }
}

/// Collation result
pub type CollationResult<T> = Result<T, CollationError>;

/// Errors raised while answering a metadata query.
///
/// Unknown statistics are not errors; handlers report them as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A handler registered for one node kind received another
    #[error("Metadata handler '{handler_name}' for {expected} received {actual}")]
    Handler {
        handler_name: String,
        expected: String,
        actual: String,
    },

    #[error("No metadata provider can answer '{0}'")]
    NoProvider(String),
}

impl MetadataError {
    /// Whether the error is a dispatch miss that lets a chain try its next provider
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Dispatch(DispatchError::NotFound { .. }))
    }
}

impl ToDiagnostic for MetadataError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Dispatch(err) => err.code(),
            Self::Handler { .. } => SQM0200,
            Self::NoProvider(_) => SQM0201,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Dispatch(err) => err.to_diagnostic(),
            _ => Diagnostic::error(self.code(), self.to_string()),
        }
    }
}

/// Metadata result
pub type MetadataResult<T> = Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmeta_diagnostics::SQM0101;

    #[test]
    fn test_dispatch_codes_pass_through() {
        let err: MetadataError = DispatchError::NotFound {
            handler_name: "row_count".into(),
            argument: "Window".into(),
            root: "RelNode".into(),
        }
        .into();
        assert_eq!(err.code(), SQM0101);
        assert!(err.is_not_found());
        assert!(!MetadataError::NoProvider("row_count".into()).is_not_found());
    }

    #[test]
    fn test_collation_message() {
        let err = CollationError::FieldIndexOutOfRange {
            index: 3,
            field_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Collation references field 3 but the row type has 2 field(s)"
        );
        assert_eq!(err.code(), SQM0300);
    }
}
