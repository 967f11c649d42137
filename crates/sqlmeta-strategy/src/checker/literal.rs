//! Literal checkers

use super::{
    FamilyOperandTypeChecker, SqlOperandTypeChecker, SqlSingleOperandTypeChecker, fail,
};
use crate::{SqlCallBinding, SqlLiteral, SqlOperandCountRange, StrategyResult, ValidationError};
use sqlmeta_types::TypeFamily;

/// The operand must be a constant, optionally allowing NULL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralOperandTypeChecker {
    allow_null: bool,
}

impl LiteralOperandTypeChecker {
    pub const fn new(allow_null: bool) -> Self {
        Self { allow_null }
    }
}

impl SqlSingleOperandTypeChecker for LiteralOperandTypeChecker {
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        let node = binding.operand(ordinal)?;
        if node.is_null_literal(true) {
            if self.allow_null {
                return Ok(true);
            }
            return fail(fail_hard, || {
                ValidationError::ArgumentMustNotBeNull {
                    operator: binding.operator_name().to_string(),
                }
                .into()
            });
        }
        if !node.is_literal() {
            return fail(fail_hard, || {
                ValidationError::ArgumentMustBeLiteral {
                    operator: binding.operator_name().to_string(),
                }
                .into()
            });
        }
        Ok(true)
    }
}

impl SqlOperandTypeChecker for LiteralOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        self.check_single_operand_type(binding, 0, fail_hard)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::ONE
    }

    fn allowed_signatures(&self, _: &str) -> String {
        "<LITERAL>".to_string()
    }

    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        Some(self)
    }
}

/// The operand must be a non-null integer literal that is zero or greater.
///
/// Checks run in order: literal and not null, then integer type, then the value,
/// so a negative value is only reported once the first two checks pass.
#[derive(Debug, Clone)]
pub struct NonNegativeIntegerLiteralChecker {
    literal: LiteralOperandTypeChecker,
    family: FamilyOperandTypeChecker,
}

impl Default for NonNegativeIntegerLiteralChecker {
    fn default() -> Self {
        Self {
            literal: LiteralOperandTypeChecker::new(false),
            family: FamilyOperandTypeChecker::new([TypeFamily::Integer]),
        }
    }
}

fn is_negative(literal: &SqlLiteral) -> bool {
    match literal {
        SqlLiteral::Exact(value) => value.is_sign_negative() && !value.is_zero(),
        SqlLiteral::Approximate(value) => *value < 0.0,
        _ => false,
    }
}

impl SqlSingleOperandTypeChecker for NonNegativeIntegerLiteralChecker {
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        if !self
            .literal
            .check_single_operand_type(binding, ordinal, fail_hard)?
        {
            return Ok(false);
        }
        if !self
            .family
            .check_single_operand_type(binding, ordinal, fail_hard)?
        {
            return Ok(false);
        }

        let negative = binding
            .operand(ordinal)?
            .as_literal()
            .is_some_and(is_negative);
        if negative {
            return fail(fail_hard, || {
                ValidationError::ArgumentMustBePositiveInteger {
                    operator: binding.operator_name().to_string(),
                }
                .into()
            });
        }
        Ok(true)
    }
}

impl SqlOperandTypeChecker for NonNegativeIntegerLiteralChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        self.check_single_operand_type(binding, 0, fail_hard)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::ONE
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        self.family.allowed_signatures(op_name)
    }

    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        Some(self)
    }
}
