//! Type transforms and transform cascades

use crate::binding::SqlOperatorBinding;
use crate::error::{StrategyError, StrategyResult};
use crate::returns::{ReturnTypeInferenceRef, SqlReturnTypeInference};
use sqlmeta_types::RelDataType;
use std::fmt;
use std::sync::Arc;

/// Adjusts a type computed by a return-type rule
pub trait SqlTypeTransform: Send + Sync + fmt::Debug {
    fn transform(
        &self,
        binding: &dyn SqlOperatorBinding,
        ty: RelDataType,
    ) -> StrategyResult<RelDataType>;
}

pub type TypeTransformRef = Arc<dyn SqlTypeTransform>;

/// Nullable if any operand is nullable; otherwise unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToNullable;

impl SqlTypeTransform for ToNullable {
    fn transform(
        &self,
        binding: &dyn SqlOperatorBinding,
        ty: RelDataType,
    ) -> StrategyResult<RelDataType> {
        for ordinal in 0..binding.operand_count() {
            if binding.operand_type(ordinal)?.is_nullable() {
                return Ok(binding.type_factory().create_type_with_nullability(&ty, true));
            }
        }
        Ok(ty)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToNotNullable;

impl SqlTypeTransform for ToNotNullable {
    fn transform(
        &self,
        binding: &dyn SqlOperatorBinding,
        ty: RelDataType,
    ) -> StrategyResult<RelDataType> {
        Ok(binding.type_factory().create_type_with_nullability(&ty, false))
    }
}

/// The varying form of a character or binary string type, keeping its length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToVarying;

impl SqlTypeTransform for ToVarying {
    fn transform(
        &self,
        binding: &dyn SqlOperatorBinding,
        ty: RelDataType,
    ) -> StrategyResult<RelDataType> {
        let name = ty.type_name();
        if !name.is_character() && !name.is_binary() {
            return Err(StrategyError::internal(format!(
                "'{}' cannot make {} varying",
                binding.operator_name(),
                ty
            )));
        }
        Ok(ty.with_type_name(name.to_varying()))
    }
}

/// The element type of a multiset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToMultisetElementType;

impl SqlTypeTransform for ToMultisetElementType {
    fn transform(
        &self,
        binding: &dyn SqlOperatorBinding,
        ty: RelDataType,
    ) -> StrategyResult<RelDataType> {
        ty.component_type().cloned().ok_or_else(|| {
            StrategyError::internal(format!(
                "'{}' expected a multiset, got {}",
                binding.operator_name(),
                ty
            ))
        })
    }
}

/// A return-type rule followed by transforms applied in order
#[derive(Debug, Clone)]
pub struct SqlTypeTransformCascade {
    rule: ReturnTypeInferenceRef,
    transforms: Vec<TypeTransformRef>,
}

impl SqlTypeTransformCascade {
    pub fn new(rule: ReturnTypeInferenceRef, transforms: Vec<TypeTransformRef>) -> Self {
        Self { rule, transforms }
    }
}

impl SqlReturnTypeInference for SqlTypeTransformCascade {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        let Some(mut ty) = self.rule.infer_return_type(binding)? else {
            return Ok(None);
        };
        for transform in &self.transforms {
            ty = transform.transform(binding, ty)?;
        }
        Ok(Some(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::{factory, ty, typed_call};
    use crate::returns::{MatchReturnTypeInference, OrdinalReturnTypeInference};
    use pretty_assertions::assert_eq;
    use sqlmeta_types::{SqlTypeName, TypeFactory};

    fn first_arg() -> ReturnTypeInferenceRef {
        Arc::new(OrdinalReturnTypeInference::new(0))
    }

    #[test]
    fn test_nullable_follows_operands() {
        let f = factory();
        let nullable_int = f.create_type_with_nullability(&ty(&f, SqlTypeName::Integer), true);
        let cascade = SqlTypeTransformCascade::new(first_arg(), vec![Arc::new(ToNullable)]);

        let strict = typed_call(&f, "ABS", vec![ty(&f, SqlTypeName::Integer)]);
        assert!(!cascade.infer_return_type(&strict).unwrap().unwrap().is_nullable());

        let loose = typed_call(
            &f,
            "+",
            vec![ty(&f, SqlTypeName::Integer), nullable_int],
        );
        assert!(cascade.infer_return_type(&loose).unwrap().unwrap().is_nullable());
    }

    #[test]
    fn test_transforms_run_in_order() {
        let f = factory();
        let nullable_char = f.create_type_with_nullability(
            &f.create_sql_type_with_precision(SqlTypeName::Char, 4),
            true,
        );
        let binding = typed_call(&f, "TRIM", vec![nullable_char]);

        let cascade = SqlTypeTransformCascade::new(
            first_arg(),
            vec![Arc::new(ToVarying), Arc::new(ToNotNullable)],
        );
        let result = cascade.infer_return_type(&binding).unwrap().unwrap();
        assert_eq!(result.full_type_string(), "VARCHAR(4) NOT NULL");

        let reversed = SqlTypeTransformCascade::new(
            first_arg(),
            vec![Arc::new(ToNotNullable), Arc::new(ToNullable)],
        );
        assert!(reversed.infer_return_type(&binding).unwrap().unwrap().is_nullable());
    }

    #[test]
    fn test_varying_rejects_non_strings() {
        let f = factory();
        let binding = typed_call(&f, "F", vec![ty(&f, SqlTypeName::Integer)]);
        let cascade = SqlTypeTransformCascade::new(first_arg(), vec![Arc::new(ToVarying)]);
        assert!(matches!(
            cascade.infer_return_type(&binding),
            Err(StrategyError::Internal(_))
        ));
    }

    #[test]
    fn test_absent_type_skips_transforms() {
        let f = factory();
        let binding = typed_call(&f, "F", vec![ty(&f, SqlTypeName::Integer)]);
        let cascade = SqlTypeTransformCascade::new(
            Arc::new(MatchReturnTypeInference::new(0, SqlTypeName::INTERVAL_TYPES)),
            vec![Arc::new(ToVarying)],
        );
        assert_eq!(cascade.infer_return_type(&binding).unwrap(), None);
    }

    #[test]
    fn test_multiset_element_type() {
        let f = factory();
        let multiset = f.create_multiset_type(ty(&f, SqlTypeName::Date));
        let binding = typed_call(&f, "ELEMENT", vec![multiset]);
        let cascade =
            SqlTypeTransformCascade::new(first_arg(), vec![Arc::new(ToMultisetElementType)]);
        assert_eq!(
            cascade.infer_return_type(&binding).unwrap(),
            Some(ty(&f, SqlTypeName::Date))
        );
    }
}
