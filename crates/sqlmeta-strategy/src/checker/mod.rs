//! Operand type checkers
//!
//! A checker validates the operands of one call. With `fail_hard` unset it answers
//! with a boolean; with `fail_hard` set a failed check is reported as the most
//! specific [`ValidationError`](crate::ValidationError) the checker knows about.
//! Checkers are stateless and shared, so they are composed rather than extended.

mod composite;
mod family;
mod literal;
mod multiset;
mod same;
mod setop;

pub use composite::{Composition, CompositeOperandTypeChecker};
pub use family::{FamilyOperandTypeChecker, MinusDateOperandTypeChecker, VariadicOperandTypeChecker};
pub use literal::{LiteralOperandTypeChecker, NonNegativeIntegerLiteralChecker};
pub use multiset::{MultisetOperandTypeChecker, RecordMultisetOperandTypeChecker};
pub use same::{ComparableOperandTypeChecker, SameOperandTypeChecker};
pub use setop::SetopOperandTypeChecker;

use crate::{SqlCallBinding, SqlOperandCountRange, StrategyResult};
use sqlmeta_types::TypeFamily;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a checker
pub type OperandTypeCheckerRef = Arc<dyn SqlOperandTypeChecker>;

/// Checks the operand types of a call
pub trait SqlOperandTypeChecker: Send + Sync + fmt::Debug {
    /// Check every operand of the call
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool>;

    /// Operand counts this checker accepts
    fn operand_count_range(&self) -> SqlOperandCountRange;

    /// Human-readable signatures this checker accepts for operator `op_name`
    fn allowed_signatures(&self, op_name: &str) -> String;

    /// This checker as a per-operand checker, if it can check operands one at a time
    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        None
    }
}

/// A checker that can validate one operand in isolation
pub trait SqlSingleOperandTypeChecker: SqlOperandTypeChecker {
    /// Check the operand at `ordinal`
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool>;
}

/// Signature text in the `'OP(<A>, <B>)'` form
pub(crate) fn aliased_signature<I, S>(op_name: &str, placeholders: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let placeholders: Vec<String> = placeholders
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect();
    format!("'{}({})'", op_name, placeholders.join(", "))
}

/// Signature text for a list of families
pub(crate) fn family_signature(op_name: &str, families: &[TypeFamily]) -> String {
    aliased_signature(op_name, families.iter().map(TypeFamily::signature_name))
}

/// Raise `error` when failing hard, otherwise report a soft failure
pub(crate) fn fail(
    fail_hard: bool,
    error: impl FnOnce() -> crate::StrategyError,
) -> StrategyResult<bool> {
    if fail_hard { Err(error()) } else { Ok(false) }
}
