//! Multiset checkers

use super::{
    FamilyOperandTypeChecker, SqlOperandTypeChecker, SqlSingleOperandTypeChecker, fail,
};
use crate::{SqlCallBinding, SqlOperandCountRange, StrategyResult, ValidationError};
use sqlmeta_types::{SqlTypeName, TypeFamily};

/// Two multisets whose element types have a common least-restrictive type
#[derive(Debug, Clone)]
pub struct MultisetOperandTypeChecker {
    families: FamilyOperandTypeChecker,
}

impl Default for MultisetOperandTypeChecker {
    fn default() -> Self {
        Self {
            families: FamilyOperandTypeChecker::new([TypeFamily::Multiset, TypeFamily::Multiset]),
        }
    }
}

impl SqlOperandTypeChecker for MultisetOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        for ordinal in 0..2 {
            if !self
                .families
                .check_single_operand_type(binding, ordinal, fail_hard)?
            {
                return Ok(false);
            }
        }

        let left = binding.operand_type(0)?;
        let right = binding.operand_type(1)?;
        let elements: Vec<_> = [left, right]
            .iter()
            .filter_map(|ty| ty.component_type().cloned())
            .collect();
        if elements.len() != 2 || binding.type_factory().least_restrictive(&elements).is_none() {
            return fail(fail_hard, || {
                ValidationError::TypeNotComparable {
                    left: left.to_string(),
                    right: right.to_string(),
                }
                .into()
            });
        }
        Ok(true)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::TWO
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        format!("<MULTISET> {} <MULTISET>", op_name)
    }
}

/// A row with exactly one field, itself a multiset, as produced by a subquery
/// feeding `UNNEST`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordMultisetOperandTypeChecker;

impl SqlSingleOperandTypeChecker for RecordMultisetOperandTypeChecker {
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        let ty = binding.operand_type(ordinal)?;
        let valid = ty.is_struct()
            && ty.field_count() == 1
            && ty.fields()[0].field_type.type_name() == SqlTypeName::Multiset;
        if !valid {
            return fail(fail_hard, || binding.new_validation_signature_error());
        }
        Ok(true)
    }
}

impl SqlOperandTypeChecker for RecordMultisetOperandTypeChecker {
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
        "UNNEST(<MULTISET>)".to_string()
    }

    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrategyError;
    use crate::checker::test_support::{factory, ty, typed_call};
    use sqlmeta_types::TypeFactory;

    #[test]
    fn test_multiset_pair() {
        let f = factory();
        let ints = f.create_multiset_type(ty(&f, SqlTypeName::Integer));
        let longs = f.create_multiset_type(ty(&f, SqlTypeName::BigInt));
        let dates = f.create_multiset_type(ty(&f, SqlTypeName::Date));
        let checker = MultisetOperandTypeChecker::default();

        let ok = typed_call(&f, "MULTISET UNION", vec![ints.clone(), longs]);
        assert!(checker.check_operand_types(&ok, true).unwrap());

        let bad = typed_call(&f, "MULTISET UNION", vec![ints.clone(), dates]);
        assert!(matches!(
            checker.check_operand_types(&bad, true),
            Err(StrategyError::Validation(ValidationError::TypeNotComparable { .. }))
        ));

        let scalar = typed_call(&f, "MULTISET UNION", vec![ints, ty(&f, SqlTypeName::Integer)]);
        assert!(!checker.check_operand_types(&scalar, false).unwrap());
    }

    #[test]
    fn test_record_multiset() {
        let f = factory();
        let multiset = f.create_multiset_type(ty(&f, SqlTypeName::Integer));
        let record = f.create_struct_type(vec![("M".into(), multiset.clone())]);
        let wide = f.create_struct_type(vec![
            ("M".into(), multiset.clone()),
            ("N".into(), multiset.clone()),
        ]);

        let checker = RecordMultisetOperandTypeChecker;
        assert!(checker
            .check_operand_types(&typed_call(&f, "UNNEST", vec![record]), false)
            .unwrap());
        assert!(!checker
            .check_operand_types(&typed_call(&f, "UNNEST", vec![wide]), false)
            .unwrap());
        assert!(!checker
            .check_operand_types(&typed_call(&f, "UNNEST", vec![multiset]), false)
            .unwrap());
    }
}
