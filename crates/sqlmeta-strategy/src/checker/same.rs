//! Same-family and comparability checkers

use super::{SqlOperandTypeChecker, aliased_signature, fail};
use crate::{SqlCallBinding, SqlOperandCountRange, StrategyResult, ValidationError};
use sqlmeta_types::{Comparability, RelDataType, SqlTypeName, TypeFamily};

/// Whether two operand types can meet in one family.
///
/// ANY-typed operands are compatible with everything; otherwise both types need
/// the same primary family.
pub(crate) fn same_family(a: &RelDataType, b: &RelDataType) -> bool {
    if a.type_name() == SqlTypeName::Any || b.type_name() == SqlTypeName::Any {
        return true;
    }
    match (
        TypeFamily::primary(a.type_name()),
        TypeFamily::primary(b.type_name()),
    ) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// The first `n` operands (or all of them) must share one family.
///
/// NULL-typed operands are skipped; they can take on any type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameOperandTypeChecker {
    operand_count: Option<usize>,
}

impl SameOperandTypeChecker {
    pub const fn new(operand_count: usize) -> Self {
        Self {
            operand_count: Some(operand_count),
        }
    }

    /// Check every operand, however many there are
    pub const fn all() -> Self {
        Self {
            operand_count: None,
        }
    }

    fn actual_count(&self, binding: &dyn SqlCallBinding) -> usize {
        self.operand_count.unwrap_or_else(|| binding.operand_count())
    }
}

impl SqlOperandTypeChecker for SameOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        // ANY meets every family, so each operand is checked against all earlier ones
        let mut seen: Vec<&RelDataType> = Vec::new();
        for ordinal in 0..self.actual_count(binding) {
            let ty = binding.operand_type(ordinal)?;
            if ty.type_name() == SqlTypeName::Null {
                continue;
            }
            if seen.iter().any(|prev| !same_family(prev, ty)) {
                return fail(fail_hard, || ValidationError::NeedSameTypeParameter.into());
            }
            seen.push(ty);
        }
        Ok(true)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        match self.operand_count {
            Some(n) => SqlOperandCountRange::fixed(n),
            None => SqlOperandCountRange::VARIADIC,
        }
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        let n = self.operand_count.unwrap_or(2);
        aliased_signature(op_name, std::iter::repeat_n("<EQUIVALENT_TYPE>", n))
    }
}

/// The first `n` operands must support at least the required comparability and
/// share one family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparableOperandTypeChecker {
    operand_count: usize,
    required: Comparability,
}

impl ComparableOperandTypeChecker {
    pub const fn new(operand_count: usize, required: Comparability) -> Self {
        Self {
            operand_count,
            required,
        }
    }

    pub const fn required(&self) -> Comparability {
        self.required
    }
}

impl SqlOperandTypeChecker for ComparableOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        let mut ok = true;
        for ordinal in 0..self.operand_count {
            if binding.operand_type(ordinal)?.comparability() < self.required {
                if fail_hard {
                    return Err(binding.new_validation_signature_error());
                }
                ok = false;
            }
        }
        if ok {
            ok = SameOperandTypeChecker::new(self.operand_count).check_operand_types(binding, false)?;
        }
        if !ok && fail_hard {
            return Err(binding.new_validation_signature_error());
        }
        Ok(ok)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::fixed(self.operand_count)
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        aliased_signature(
            op_name,
            std::iter::repeat_n("<COMPARABLE_TYPE>", self.operand_count),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrategyError;
    use crate::checker::test_support::{factory, ty, typed_call};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sqlmeta_types::TypeFactory;

    #[rstest]
    #[case(SqlTypeName::Integer, SqlTypeName::Integer, true)]
    #[case(SqlTypeName::Integer, SqlTypeName::Double, true)]
    #[case(SqlTypeName::Integer, SqlTypeName::Varchar, false)]
    #[case(SqlTypeName::Char, SqlTypeName::Varchar, true)]
    #[case(SqlTypeName::Char, SqlTypeName::Binary, false)]
    #[case(SqlTypeName::Date, SqlTypeName::Time, false)]
    #[case(SqlTypeName::Null, SqlTypeName::Boolean, true)]
    #[case(SqlTypeName::Any, SqlTypeName::Boolean, true)]
    fn test_same_x2(#[case] a: SqlTypeName, #[case] b: SqlTypeName, #[case] expected: bool) {
        let f = factory();
        let binding = typed_call(&f, "=", vec![ty(&f, a), ty(&f, b)]);
        assert_eq!(
            SameOperandTypeChecker::new(2)
                .check_operand_types(&binding, false)
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_only_first_n_operands_checked() {
        let f = factory();
        let binding = typed_call(
            &f,
            "F",
            vec![
                ty(&f, SqlTypeName::Integer),
                ty(&f, SqlTypeName::BigInt),
                ty(&f, SqlTypeName::Boolean),
            ],
        );
        assert!(SameOperandTypeChecker::new(2).check_operand_types(&binding, true).unwrap());
        assert!(!SameOperandTypeChecker::all().check_operand_types(&binding, false).unwrap());
    }

    #[test]
    fn test_same_failure_is_specific() {
        let f = factory();
        let binding = typed_call(
            &f,
            "=",
            vec![ty(&f, SqlTypeName::Integer), ty(&f, SqlTypeName::Boolean)],
        );
        let err = SameOperandTypeChecker::new(2)
            .check_operand_types(&binding, true)
            .unwrap_err();
        assert_eq!(err, StrategyError::from(ValidationError::NeedSameTypeParameter));
    }

    #[test]
    fn test_comparable_ordered_rejects_multisets() {
        let f = factory();
        let multiset = f.create_multiset_type(ty(&f, SqlTypeName::Integer));
        let binding = typed_call(&f, "<", vec![multiset.clone(), multiset]);

        let ordered = ComparableOperandTypeChecker::new(2, Comparability::All);
        let unordered = ComparableOperandTypeChecker::new(2, Comparability::Unordered);
        assert!(!ordered.check_operand_types(&binding, false).unwrap());
        assert!(unordered.check_operand_types(&binding, false).unwrap());
        assert!(matches!(
            ordered.check_operand_types(&binding, true),
            Err(StrategyError::Validation(ValidationError::Signature { .. }))
        ));
    }

    #[test]
    fn test_signatures() {
        assert_eq!(
            SameOperandTypeChecker::new(2).allowed_signatures("="),
            "'=(<EQUIVALENT_TYPE>, <EQUIVALENT_TYPE>)'"
        );
        assert_eq!(
            ComparableOperandTypeChecker::new(2, Comparability::All).allowed_signatures("<"),
            "'<(<COMPARABLE_TYPE>, <COMPARABLE_TYPE>)'"
        );
    }
}
