//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - SQM0001-SQM0099: Validation failures (operand shape, type or value)
//! - SQM0100-SQM0199: Dispatch errors (handler resolution, type hierarchy)
//! - SQM0200-SQM0299: Metadata query errors
//! - SQM0300-SQM0399: Collation errors
//! - SQM0400-SQM0499: Internal invariant violations and configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a validation failure (0001-0099)
    pub const fn is_validation_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a dispatch error (0100-0199)
    pub const fn is_dispatch_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a metadata error (0200-0299)
    pub const fn is_metadata_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a collation error (0300-0399)
    pub const fn is_collation_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is an internal error (0400-0499)
    pub const fn is_internal_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQM{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Validation failures (0001-0099)
    map.insert(1, ErrorInfo::new("Cannot apply operator to arguments")
        .with_help("Check the operand types against the supported signatures"));
    map.insert(2, ErrorInfo::new("Invalid number of arguments"));
    map.insert(3, ErrorInfo::new("Illegal use of NULL"));
    map.insert(4, ErrorInfo::new("Argument must be a literal"));
    map.insert(5, ErrorInfo::new("Argument must not be NULL"));
    map.insert(6, ErrorInfo::new("Argument must be a positive integer literal"));
    map.insert(7, ErrorInfo::new("Parameters must be of the same type"));
    map.insert(8, ErrorInfo::new("Types are not comparable"));
    map.insert(9, ErrorInfo::new("Different collations"));
    map.insert(10, ErrorInfo::new("Column count mismatch in set operator"));
    map.insert(11, ErrorInfo::new("Column type mismatch in set operator"));
    map.insert(12, ErrorInfo::new("Result precision overflows"));

    // Dispatch errors (0100-0199)
    map.insert(100, ErrorInfo::new("Ambiguous handler resolution")
        .with_help("Add a handler for the argument type itself to break the tie"));
    map.insert(101, ErrorInfo::new("No applicable handler")
        .with_help("Register a catch-all handler keyed to the hierarchy root"));
    map.insert(102, ErrorInfo::new("Type not declared in hierarchy"));
    map.insert(103, ErrorInfo::new("Duplicate type declaration"));
    map.insert(104, ErrorInfo::new("Duplicate handler"));

    // Metadata errors (0200-0299)
    map.insert(200, ErrorInfo::new("Metadata handler failed"));
    map.insert(201, ErrorInfo::new("No metadata provider registered"));

    // Collation errors (0300-0399)
    map.insert(300, ErrorInfo::new("Collation field index out of range"));

    // Internal errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal invariant violation"));
    map.insert(401, ErrorInfo::new("Configuration error"));

    map
});

// Validation failures
pub const SQM0001: ErrorCode = ErrorCode::new(1);
pub const SQM0002: ErrorCode = ErrorCode::new(2);
pub const SQM0003: ErrorCode = ErrorCode::new(3);
pub const SQM0004: ErrorCode = ErrorCode::new(4);
pub const SQM0005: ErrorCode = ErrorCode::new(5);
pub const SQM0006: ErrorCode = ErrorCode::new(6);
pub const SQM0007: ErrorCode = ErrorCode::new(7);
pub const SQM0008: ErrorCode = ErrorCode::new(8);
pub const SQM0009: ErrorCode = ErrorCode::new(9);
pub const SQM0010: ErrorCode = ErrorCode::new(10);
pub const SQM0011: ErrorCode = ErrorCode::new(11);
pub const SQM0012: ErrorCode = ErrorCode::new(12);

// Dispatch errors
pub const SQM0100: ErrorCode = ErrorCode::new(100);
pub const SQM0101: ErrorCode = ErrorCode::new(101);
pub const SQM0102: ErrorCode = ErrorCode::new(102);
pub const SQM0103: ErrorCode = ErrorCode::new(103);
pub const SQM0104: ErrorCode = ErrorCode::new(104);

// Metadata errors
pub const SQM0200: ErrorCode = ErrorCode::new(200);
pub const SQM0201: ErrorCode = ErrorCode::new(201);

// Collation errors
pub const SQM0300: ErrorCode = ErrorCode::new(300);

// Internal errors
pub const SQM0400: ErrorCode = ErrorCode::new(400);
pub const SQM0401: ErrorCode = ErrorCode::new(401);
