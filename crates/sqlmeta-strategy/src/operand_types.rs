//! Operand-type inference
//!
//! Assigns types to operands the validator could not type on its own, such as
//! dynamic parameters and untyped NULLs. Each rule fills every slot of
//! `operand_types`; callers keep the slots they need.

use crate::binding::SqlCallBinding;
use crate::error::{StrategyError, StrategyResult};
use sqlmeta_types::{RelDataType, SqlTypeName};
use std::fmt;
use std::sync::Arc;

/// Infers the types of a call's untyped operands
pub trait SqlOperandTypeInference: Send + Sync + fmt::Debug {
    fn infer_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        return_type: &RelDataType,
        operand_types: &mut [RelDataType],
    ) -> StrategyResult<()>;
}

pub type OperandTypeInferenceRef = Arc<dyn SqlOperandTypeInference>;

/// Every operand takes the type of the first operand whose type is known
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstKnownOperandTypeInference;

impl SqlOperandTypeInference for FirstKnownOperandTypeInference {
    fn infer_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        _return_type: &RelDataType,
        operand_types: &mut [RelDataType],
    ) -> StrategyResult<()> {
        let unknown = binding.unknown_type();
        let mut known = None;
        for ordinal in 0..binding.operand_count() {
            let ty = binding.operand_type(ordinal)?;
            if *ty != unknown {
                known = Some(ty.clone());
                break;
            }
        }
        let known = known.ok_or_else(|| {
            StrategyError::internal(format!(
                "no operand of '{}' has a known type",
                binding.operator_name()
            ))
        })?;
        operand_types.fill(known);
        Ok(())
    }
}

/// Operands take the call's return type, field by field when it is a row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReturnTypeOperandTypeInference;

impl SqlOperandTypeInference for ReturnTypeOperandTypeInference {
    fn infer_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        return_type: &RelDataType,
        operand_types: &mut [RelDataType],
    ) -> StrategyResult<()> {
        if !return_type.is_struct() {
            operand_types.fill(return_type.clone());
            return Ok(());
        }
        if return_type.field_count() != operand_types.len() {
            return Err(StrategyError::internal(format!(
                "'{}' returns {} with {} field(s) for {} operand(s)",
                binding.operator_name(),
                return_type,
                return_type.field_count(),
                operand_types.len()
            )));
        }
        for (slot, field) in operand_types.iter_mut().zip(return_type.fields()) {
            *slot = field.field_type.clone();
        }
        Ok(())
    }
}

/// Operands are assumed to be boolean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanOperandTypeInference;

impl SqlOperandTypeInference for BooleanOperandTypeInference {
    fn infer_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        _return_type: &RelDataType,
        operand_types: &mut [RelDataType],
    ) -> StrategyResult<()> {
        operand_types.fill(binding.type_factory().create_sql_type(SqlTypeName::Boolean));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::{factory, ty};
    use crate::{CallBinding, SqlLiteral, SqlNode};
    use pretty_assertions::assert_eq;
    use sqlmeta_types::TypeFactory;

    #[test]
    fn test_first_known() {
        let f = factory();
        let binding = CallBinding::from_operands(
            "=",
            vec![
                SqlNode::DynamicParam(0),
                SqlNode::literal(SqlLiteral::exact(7)),
            ],
            &f,
        );
        let mut slots = vec![binding.unknown_type(); 2];
        FirstKnownOperandTypeInference
            .infer_operand_types(&binding, &ty(&f, SqlTypeName::Boolean), &mut slots)
            .unwrap();
        assert_eq!(slots, vec![ty(&f, SqlTypeName::Integer); 2]);
    }

    #[test]
    fn test_first_known_without_any_known_type() {
        let f = factory();
        let binding = CallBinding::from_operands(
            "=",
            vec![SqlNode::DynamicParam(0), SqlNode::DynamicParam(1)],
            &f,
        );
        let mut slots = vec![binding.unknown_type(); 2];
        let result = FirstKnownOperandTypeInference.infer_operand_types(
            &binding,
            &ty(&f, SqlTypeName::Boolean),
            &mut slots,
        );
        assert!(matches!(result, Err(StrategyError::Internal(_))));
    }

    #[test]
    fn test_return_type_maps_row_fields() {
        let f = factory();
        let binding = CallBinding::from_operands(
            "ROW",
            vec![SqlNode::DynamicParam(0), SqlNode::DynamicParam(1)],
            &f,
        );
        let row = f.create_struct_type(vec![
            ("A".into(), ty(&f, SqlTypeName::Integer)),
            ("B".into(), ty(&f, SqlTypeName::Date)),
        ]);
        let mut slots = vec![binding.unknown_type(); 2];
        ReturnTypeOperandTypeInference
            .infer_operand_types(&binding, &row, &mut slots)
            .unwrap();
        assert_eq!(
            slots,
            vec![ty(&f, SqlTypeName::Integer), ty(&f, SqlTypeName::Date)]
        );

        let mut three = vec![binding.unknown_type(); 3];
        assert!(ReturnTypeOperandTypeInference
            .infer_operand_types(&binding, &row, &mut three)
            .is_err());

        let mut scalar = vec![binding.unknown_type(); 2];
        ReturnTypeOperandTypeInference
            .infer_operand_types(&binding, &ty(&f, SqlTypeName::Double), &mut scalar)
            .unwrap();
        assert_eq!(scalar, vec![ty(&f, SqlTypeName::Double); 2]);
    }

    #[test]
    fn test_boolean() {
        let f = factory();
        let binding = CallBinding::from_operands("AND", vec![SqlNode::DynamicParam(0)], &f);
        let mut slots = vec![binding.unknown_type()];
        BooleanOperandTypeInference
            .infer_operand_types(&binding, &ty(&f, SqlTypeName::Boolean), &mut slots)
            .unwrap();
        assert_eq!(slots, vec![ty(&f, SqlTypeName::Boolean)]);
    }
}
