//! sqlmeta diagnostics
//!
//! This crate provides the error-reporting vocabulary shared by the analysis crates:
//! structured error codes, severities and the [`Diagnostic`] record every crate-local
//! error converts into.

mod diagnostic;
mod error_code;

pub use diagnostic::*;
pub use error_code::*;
