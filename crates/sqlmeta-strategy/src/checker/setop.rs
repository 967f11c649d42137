//! Set-operator operand checker

use super::{SqlOperandTypeChecker, fail};
use crate::{SqlCallBinding, SqlOperandCountRange, StrategyError, StrategyResult, ValidationError};

/// Operands of UNION, INTERSECT and EXCEPT: rows with equal column counts whose
/// columns are pairwise union compatible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetopOperandTypeChecker;

impl SqlOperandTypeChecker for SetopOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        let types = binding.collect_operand_types();
        if let Some(ty) = types.iter().find(|ty| !ty.is_struct()) {
            return Err(StrategyError::internal(format!(
                "set operator '{}' applied to non-row type {}",
                binding.operator_name(),
                ty
            )));
        }

        let Some(first) = types.first() else {
            return Ok(true);
        };
        let column_count = first.field_count();
        if types.iter().any(|ty| ty.field_count() != column_count) {
            return fail(fail_hard, || {
                ValidationError::ColumnCountMismatch {
                    operator: binding.operator_name().to_string(),
                }
                .into()
            });
        }

        for column in 0..column_count {
            let slice: Vec<_> = types
                .iter()
                .map(|ty| ty.fields()[column].field_type.clone())
                .collect();
            if binding.type_factory().least_restrictive(&slice).is_none() {
                return fail(fail_hard, || {
                    ValidationError::ColumnTypeMismatch {
                        operator: binding.operator_name().to_string(),
                        column: column + 1,
                    }
                    .into()
                });
            }
        }
        Ok(true)
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        SqlOperandCountRange::TWO
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        format!("<ROW> {} <ROW>", op_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::{factory, ty, typed_call};
    use pretty_assertions::assert_eq;
    use sqlmeta_types::{RelDataType, SqlTypeFactory, SqlTypeName, TypeFactory};

    fn row(f: &SqlTypeFactory, names: &[SqlTypeName]) -> RelDataType {
        f.create_struct_type(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| (format!("C{}", i), f.create_sql_type(*name)))
                .collect(),
        )
    }

    #[test]
    fn test_compatible_rows() {
        let f = factory();
        let binding = typed_call(
            &f,
            "UNION",
            vec![
                row(&f, &[SqlTypeName::Integer, SqlTypeName::Char]),
                row(&f, &[SqlTypeName::BigInt, SqlTypeName::Varchar]),
            ],
        );
        assert!(SetopOperandTypeChecker.check_operand_types(&binding, true).unwrap());
    }

    #[test]
    fn test_column_count_mismatch() {
        let f = factory();
        let binding = typed_call(
            &f,
            "UNION",
            vec![
                row(&f, &[SqlTypeName::Integer]),
                row(&f, &[SqlTypeName::Integer, SqlTypeName::Integer]),
            ],
        );
        assert_eq!(
            SetopOperandTypeChecker.check_operand_types(&binding, true).unwrap_err(),
            StrategyError::from(ValidationError::ColumnCountMismatch {
                operator: "UNION".into()
            })
        );
    }

    #[test]
    fn test_column_type_mismatch_is_one_based() {
        let f = factory();
        let binding = typed_call(
            &f,
            "EXCEPT",
            vec![
                row(&f, &[SqlTypeName::Integer, SqlTypeName::Date]),
                row(&f, &[SqlTypeName::Integer, SqlTypeName::Boolean]),
            ],
        );
        assert_eq!(
            SetopOperandTypeChecker.check_operand_types(&binding, true).unwrap_err(),
            StrategyError::from(ValidationError::ColumnTypeMismatch {
                operator: "EXCEPT".into(),
                column: 2
            })
        );
        assert!(!SetopOperandTypeChecker.check_operand_types(&binding, false).unwrap());
    }

    #[test]
    fn test_non_row_is_internal() {
        let f = factory();
        let binding = typed_call(&f, "UNION", vec![ty(&f, SqlTypeName::Integer); 2]);
        assert!(matches!(
            SetopOperandTypeChecker.check_operand_types(&binding, false),
            Err(StrategyError::Internal(_))
        ));
    }
}
