//! Family-membership checkers

use super::{
    SqlOperandTypeChecker, SqlSingleOperandTypeChecker, fail, family_signature,
};
use crate::{
    SameOperandTypeChecker, SqlCallBinding, SqlOperandCountRange, StrategyError, StrategyResult,
    ValidationError,
};
use sqlmeta_types::TypeFamily;

/// Each operand position must belong to the family at that position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyOperandTypeChecker {
    families: Vec<TypeFamily>,
}

impl FamilyOperandTypeChecker {
    pub fn new(families: impl Into<Vec<TypeFamily>>) -> Self {
        Self {
            families: families.into(),
        }
    }

    pub fn families(&self) -> &[TypeFamily] {
        &self.families
    }
}

impl SqlSingleOperandTypeChecker for FamilyOperandTypeChecker {
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        let family = self.families.get(ordinal).ok_or_else(|| {
            StrategyError::internal(format!(
                "no family declared for operand {} of '{}'",
                ordinal,
                binding.operator_name()
            ))
        })?;
        if *family == TypeFamily::Any {
            return Ok(true);
        }

        if binding.operand(ordinal)?.is_null_literal(false) {
            return fail(fail_hard, || ValidationError::NullIllegal.into());
        }

        if !family.contains(binding.operand_type(ordinal)?) {
            return fail(fail_hard, || binding.new_validation_signature_error());
        }
        Ok(true)
    }
}

impl SqlOperandTypeChecker for FamilyOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        // An arity mismatch means this rule does not apply; composites try the next one.
        if self.families.len() != binding.operand_count() {
            return Ok(false);
        }
        for ordinal in 0..self.families.len() {
            if !self.check_single_operand_type(binding, ordinal, fail_hard)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::fixed(self.families.len())
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        family_signature(op_name, &self.families)
    }

    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        Some(self)
    }
}

/// Accepts any number of operands of any type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariadicOperandTypeChecker;

impl SqlOperandTypeChecker for VariadicOperandTypeChecker {
    fn check_operand_types(&self, _: &dyn SqlCallBinding, _: bool) -> StrategyResult<bool> {
        Ok(true)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::VARIADIC
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        format!("{}(...)", op_name)
    }
}

/// `datetime - datetime` yielding an interval: (Datetime, Datetime, DatetimeInterval)
/// where the two datetimes share a family
#[derive(Debug, Clone)]
pub struct MinusDateOperandTypeChecker {
    families: FamilyOperandTypeChecker,
    same: SameOperandTypeChecker,
}

impl Default for MinusDateOperandTypeChecker {
    fn default() -> Self {
        Self {
            families: FamilyOperandTypeChecker::new([
                TypeFamily::Datetime,
                TypeFamily::Datetime,
                TypeFamily::DatetimeInterval,
            ]),
            same: SameOperandTypeChecker::new(2),
        }
    }
}

impl SqlSingleOperandTypeChecker for MinusDateOperandTypeChecker {
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        self.families
            .check_single_operand_type(binding, ordinal, fail_hard)
    }
}

impl SqlOperandTypeChecker for MinusDateOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        Ok(self.families.check_operand_types(binding, fail_hard)?
            && self.same.check_operand_types(binding, fail_hard)?)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        self.families.operand_count_range()
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        self.families.allowed_signatures(op_name)
    }

    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        Some(self)
    }
}
