//! Return-type inference
//!
//! Rules compute the type of a call from its operand types. A rule yields `None`
//! when it has no answer for the call; [`ReturnTypeInferenceChain`] tries the next
//! rule in that case. Rules are stateless and shared via [`ReturnTypeInferenceRef`].

use crate::binding::{ExplicitOperatorBinding, SqlOperatorBinding};
use crate::error::{StrategyError, StrategyResult, ValidationError};
use sqlmeta_types::{RelDataType, SqlCollation, SqlTypeName};
use std::fmt;
use std::sync::Arc;

/// Infers the return type of a call
pub trait SqlReturnTypeInference: Send + Sync + fmt::Debug {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>>;
}

/// Shared handle to a return-type rule
pub type ReturnTypeInferenceRef = Arc<dyn SqlReturnTypeInference>;

/// The type of the operand at a fixed ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalReturnTypeInference {
    ordinal: usize,
}

impl OrdinalReturnTypeInference {
    pub const fn new(ordinal: usize) -> Self {
        Self { ordinal }
    }
}

impl SqlReturnTypeInference for OrdinalReturnTypeInference {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        binding.operand_type(self.ordinal).map(|ty| Some(ty.clone()))
    }
}

/// A fixed type, built by the binding's type factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplicitReturnTypeInference {
    type_name: SqlTypeName,
    precision: Option<u32>,
}

impl ExplicitReturnTypeInference {
    pub const fn new(type_name: SqlTypeName) -> Self {
        Self {
            type_name,
            precision: None,
        }
    }

    pub const fn with_precision(type_name: SqlTypeName, precision: u32) -> Self {
        Self {
            type_name,
            precision: Some(precision),
        }
    }
}

impl SqlReturnTypeInference for ExplicitReturnTypeInference {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        let factory = binding.type_factory();
        let ty = match self.precision {
            Some(precision) => factory.create_sql_type_with_precision(self.type_name, precision),
            None => factory.create_sql_type(self.type_name),
        };
        Ok(Some(ty))
    }
}

/// The least restrictive type of all operands, as computed by the type factory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastRestrictiveReturnTypeInference;

impl SqlReturnTypeInference for LeastRestrictiveReturnTypeInference {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        let types = binding.collect_operand_types();
        Ok(binding.type_factory().least_restrictive(&types))
    }
}

/// The type of the first operand, from `start` on, whose type name is one of
/// `type_names`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReturnTypeInference {
    start: usize,
    type_names: Vec<SqlTypeName>,
}

impl MatchReturnTypeInference {
    pub fn new(start: usize, type_names: impl Into<Vec<SqlTypeName>>) -> Self {
        Self {
            start,
            type_names: type_names.into(),
        }
    }
}

impl SqlReturnTypeInference for MatchReturnTypeInference {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        for ordinal in self.start..binding.operand_count() {
            let ty = binding.operand_type(ordinal)?;
            if self.type_names.contains(&ty.type_name()) {
                return Ok(Some(ty.clone()));
            }
        }
        Ok(None)
    }
}

/// Tries each rule in turn and returns the first type produced
#[derive(Debug, Clone)]
pub struct ReturnTypeInferenceChain {
    rules: Vec<ReturnTypeInferenceRef>,
}

impl ReturnTypeInferenceChain {
    pub fn new(rules: Vec<ReturnTypeInferenceRef>) -> Self {
        Self { rules }
    }
}

impl SqlReturnTypeInference for ReturnTypeInferenceChain {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        for rule in &self.rules {
            if let Some(ty) = rule.infer_return_type(binding)? {
                return Ok(Some(ty));
            }
        }
        Ok(None)
    }
}

/// Result of a dyadic string operator such as `||`: the type of the first operand
/// with the precisions of both operands added.
///
/// For character operands the charsets must agree and the result collation is
/// picked by coercibility. Other operands must have the same type name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DyadicStringSumPrecision;

impl DyadicStringSumPrecision {
    /// The result collation and the operand it was picked from
    fn picked_collation<'a>(
        left: &'a RelDataType,
        right: &'a RelDataType,
    ) -> StrategyResult<Option<(SqlCollation, &'a RelDataType)>> {
        if left.charset() != right.charset() {
            return Err(ValidationError::TypeNotComparable {
                left: left.to_string(),
                right: right.to_string(),
            }
            .into());
        }
        let picked = match (left.collation(), right.collation()) {
            (Some(l), Some(r)) => {
                let collation = SqlCollation::coercibility_dyadic(l, r)?;
                let side = if &collation == r { right } else { left };
                Some((collation, side))
            }
            (Some(l), None) => Some((l.clone(), left)),
            (None, Some(r)) => Some((r.clone(), right)),
            (None, None) => None,
        };
        Ok(picked)
    }
}

impl SqlReturnTypeInference for DyadicStringSumPrecision {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        let left = binding.operand_type(0)?;
        let right = binding.operand_type(1)?;
        let both_char = left.in_char_family() && right.in_char_family();
        if !both_char && !left.same_named_type(right) {
            return Err(StrategyError::internal(format!(
                "'{}' needs operands of the same type, got {} and {}",
                binding.operator_name(),
                left,
                right
            )));
        }

        let factory = binding.type_factory();
        let precision = left
            .precision()
            .unwrap_or_default()
            .checked_add(right.precision().unwrap_or_default())
            .ok_or_else(|| ValidationError::PrecisionOverflow {
                operator: binding.operator_name().to_string(),
                max: u32::MAX,
            })?;
        let ty = factory.create_sql_type_with_precision(left.type_name(), precision);
        if !left.in_char_family() {
            return Ok(Some(ty));
        }

        let ty = match Self::picked_collation(left, right)? {
            Some((collation, picked)) => match picked.charset() {
                Some(charset) => {
                    factory.create_type_with_charset_and_collation(&ty, charset, collation)
                }
                None => ty,
            },
            None => ty,
        };
        Ok(Some(ty))
    }
}

/// A multiset of the least restrictive element type of all multiset operands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultisetReturnTypeInference;

impl SqlReturnTypeInference for MultisetReturnTypeInference {
    fn infer_return_type(
        &self,
        binding: &dyn SqlOperatorBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        let mut element_types = Vec::with_capacity(binding.operand_count());
        for ordinal in 0..binding.operand_count() {
            let ty = binding.operand_type(ordinal)?;
            let element = ty.component_type().ok_or_else(|| {
                StrategyError::internal(format!(
                    "'{}' operand {} is {}, not a multiset",
                    binding.operator_name(),
                    ordinal,
                    ty
                ))
            })?;
            element_types.push(element.clone());
        }

        let elements = ExplicitOperatorBinding::new(binding, element_types);
        let element = LeastRestrictiveReturnTypeInference.infer_return_type(&elements)?;
        Ok(element.map(|element| binding.type_factory().create_multiset_type(element)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::{factory, ty, typed_call};
    use pretty_assertions::assert_eq;
    use sqlmeta_types::{TypeError, TypeFactory};

    #[test]
    fn test_ordinal_and_explicit() {
        let f = factory();
        let binding = typed_call(
            &f,
            "F",
            vec![ty(&f, SqlTypeName::Integer), ty(&f, SqlTypeName::Date)],
        );
        assert_eq!(
            OrdinalReturnTypeInference::new(1)
                .infer_return_type(&binding)
                .unwrap(),
            Some(ty(&f, SqlTypeName::Date))
        );
        assert!(OrdinalReturnTypeInference::new(2)
            .infer_return_type(&binding)
            .is_err());

        let varchar = ExplicitReturnTypeInference::with_precision(SqlTypeName::Varchar, 2000)
            .infer_return_type(&binding)
            .unwrap()
            .unwrap();
        assert_eq!(varchar.to_string(), "VARCHAR(2000)");
    }

    #[test]
    fn test_match_and_chain() {
        let f = factory();
        let interval = ty(&f, SqlTypeName::IntervalDayTime);
        let binding = typed_call(
            &f,
            "*",
            vec![ty(&f, SqlTypeName::Integer), interval.clone()],
        );
        let first_interval = MatchReturnTypeInference::new(0, SqlTypeName::INTERVAL_TYPES);
        assert_eq!(
            first_interval.infer_return_type(&binding).unwrap(),
            Some(interval)
        );

        let numbers = typed_call(
            &f,
            "*",
            vec![ty(&f, SqlTypeName::Integer), ty(&f, SqlTypeName::BigInt)],
        );
        assert_eq!(first_interval.infer_return_type(&numbers).unwrap(), None);

        let product = ReturnTypeInferenceChain::new(vec![
            Arc::new(first_interval),
            Arc::new(LeastRestrictiveReturnTypeInference),
        ]);
        assert_eq!(
            product.infer_return_type(&numbers).unwrap(),
            Some(ty(&f, SqlTypeName::BigInt))
        );
    }

    #[test]
    fn test_string_sum_precision() {
        let f = factory();
        let binding = typed_call(
            &f,
            "||",
            vec![
                f.create_sql_type_with_precision(SqlTypeName::Char, 3),
                f.create_sql_type_with_precision(SqlTypeName::Varchar, 7),
            ],
        );
        let result = DyadicStringSumPrecision
            .infer_return_type(&binding)
            .unwrap()
            .unwrap();
        assert_eq!(result.to_string(), "CHAR(10)");
        assert_eq!(result.charset(), Some("ISO-8859-1"));
    }

    #[test]
    fn test_string_sum_precision_overflow() {
        let f = factory();
        let binding = typed_call(
            &f,
            "||",
            vec![
                f.create_sql_type_with_precision(SqlTypeName::Varchar, u32::MAX),
                f.create_sql_type_with_precision(SqlTypeName::Varchar, 1),
            ],
        );
        assert_eq!(
            DyadicStringSumPrecision.infer_return_type(&binding),
            Err(StrategyError::from(ValidationError::PrecisionOverflow {
                operator: "||".into(),
                max: u32::MAX,
            }))
        );
    }

    #[test]
    fn test_string_sum_explicit_collations_conflict() {
        let f = factory();
        let explicit = |name: &str| {
            f.create_type_with_charset_and_collation(
                &f.create_sql_type_with_precision(SqlTypeName::Varchar, 5),
                "ISO-8859-1",
                SqlCollation::new(name, sqlmeta_types::Coercibility::Explicit),
            )
        };
        let binding = typed_call(&f, "||", vec![explicit("a"), explicit("b")]);
        assert!(matches!(
            DyadicStringSumPrecision.infer_return_type(&binding),
            Err(StrategyError::Type(TypeError::DifferentCollations { .. }))
        ));
    }

    #[test]
    fn test_string_sum_charset_mismatch() {
        let f = factory();
        let latin = f.create_sql_type_with_precision(SqlTypeName::Char, 2);
        let utf = f.create_type_with_charset_and_collation(
            &latin,
            "UTF-16",
            SqlCollation::coercible("UTF-16$en_US"),
        );
        let binding = typed_call(&f, "||", vec![latin, utf]);
        assert!(matches!(
            DyadicStringSumPrecision.infer_return_type(&binding),
            Err(StrategyError::Validation(ValidationError::TypeNotComparable { .. }))
        ));
    }

    #[test]
    fn test_string_sum_binary_needs_same_name() {
        let f = factory();
        let binding = typed_call(
            &f,
            "||",
            vec![
                f.create_sql_type_with_precision(SqlTypeName::Binary, 2),
                f.create_sql_type_with_precision(SqlTypeName::Binary, 4),
            ],
        );
        let result = DyadicStringSumPrecision
            .infer_return_type(&binding)
            .unwrap()
            .unwrap();
        assert_eq!(result.to_string(), "BINARY(6)");

        let mixed = typed_call(
            &f,
            "||",
            vec![
                f.create_sql_type_with_precision(SqlTypeName::Binary, 2),
                f.create_sql_type_with_precision(SqlTypeName::Varbinary, 4),
            ],
        );
        assert!(matches!(
            DyadicStringSumPrecision.infer_return_type(&mixed),
            Err(StrategyError::Internal(_))
        ));
    }

    #[test]
    fn test_multiset_unifies_elements() {
        let f = factory();
        let binding = typed_call(
            &f,
            "MULTISET UNION",
            vec![
                f.create_multiset_type(ty(&f, SqlTypeName::Integer)),
                f.create_multiset_type(ty(&f, SqlTypeName::BigInt)),
            ],
        );
        let result = MultisetReturnTypeInference
            .infer_return_type(&binding)
            .unwrap()
            .unwrap();
        assert_eq!(result.to_string(), "BIGINT MULTISET");

        let scalar = typed_call(&f, "MULTISET UNION", vec![ty(&f, SqlTypeName::Integer)]);
        assert!(matches!(
            MultisetReturnTypeInference.infer_return_type(&scalar),
            Err(StrategyError::Internal(_))
        ));
    }
}
