//! Type factory seam
//!
//! Strategies never construct types directly; they ask the active [`TypeFactory`],
//! which the embedding validator supplies. [`SqlTypeFactory`] is the default
//! implementation.

use crate::{RelDataType, SqlCollation, SqlTypeName, TypeSystemConfig, coercion};
use std::fmt;

/// Creates and combines SQL types
pub trait TypeFactory: Send + Sync + fmt::Debug {
    /// Defaults and limits in effect
    fn config(&self) -> &TypeSystemConfig;

    /// A non-nullable type with default precision/scale and attachments
    fn create_sql_type(&self, name: SqlTypeName) -> RelDataType;

    fn create_sql_type_with_precision(&self, name: SqlTypeName, precision: u32) -> RelDataType;

    fn create_sql_type_with_precision_scale(
        &self,
        name: SqlTypeName,
        precision: u32,
        scale: u32,
    ) -> RelDataType;

    fn create_type_with_nullability(&self, ty: &RelDataType, nullable: bool) -> RelDataType;

    fn create_type_with_charset_and_collation(
        &self,
        ty: &RelDataType,
        charset: &str,
        collation: SqlCollation,
    ) -> RelDataType;

    fn create_multiset_type(&self, element: RelDataType) -> RelDataType;

    fn create_struct_type(&self, fields: Vec<(String, RelDataType)>) -> RelDataType;

    /// The smallest type every input can be implicitly widened to, if one exists
    fn least_restrictive(&self, types: &[RelDataType]) -> Option<RelDataType>;
}

/// Default type factory
#[derive(Debug, Clone, Default)]
pub struct SqlTypeFactory {
    config: TypeSystemConfig,
}

impl SqlTypeFactory {
    pub fn new(config: TypeSystemConfig) -> Self {
        Self { config }
    }

    fn with_char_defaults(&self, ty: RelDataType) -> RelDataType {
        if ty.type_name().is_character() {
            ty.with_charset_and_collation(
                self.config.default_charset.clone(),
                SqlCollation::coercible(self.config.default_collation.clone()),
            )
        } else {
            ty
        }
    }
}

impl TypeFactory for SqlTypeFactory {
    fn config(&self) -> &TypeSystemConfig {
        &self.config
    }

    fn create_sql_type(&self, name: SqlTypeName) -> RelDataType {
        let ty = RelDataType::new(name);
        let ty = match name {
            SqlTypeName::Decimal => ty
                .with_precision(self.config.default_decimal_precision)
                .with_scale(self.config.default_decimal_scale),
            SqlTypeName::Char
            | SqlTypeName::Varchar
            | SqlTypeName::Binary
            | SqlTypeName::Varbinary => ty.with_precision(self.config.default_char_precision),
            SqlTypeName::Time | SqlTypeName::Timestamp => ty.with_precision(0),
            SqlTypeName::Null => ty.with_nullable(true),
            _ => ty,
        };
        self.with_char_defaults(ty)
    }

    fn create_sql_type_with_precision(&self, name: SqlTypeName, precision: u32) -> RelDataType {
        let ty = RelDataType::new(name);
        let ty = if name.allows_precision() {
            ty.with_precision(precision)
        } else {
            ty
        };
        let ty = if name.allows_scale() { ty.with_scale(0) } else { ty };
        self.with_char_defaults(ty)
    }

    fn create_sql_type_with_precision_scale(
        &self,
        name: SqlTypeName,
        precision: u32,
        scale: u32,
    ) -> RelDataType {
        if !name.allows_scale() {
            return self.create_sql_type_with_precision(name, precision);
        }
        RelDataType::new(name)
            .with_precision(precision)
            .with_scale(scale)
    }

    fn create_type_with_nullability(&self, ty: &RelDataType, nullable: bool) -> RelDataType {
        ty.clone().with_nullable(nullable)
    }

    fn create_type_with_charset_and_collation(
        &self,
        ty: &RelDataType,
        charset: &str,
        collation: SqlCollation,
    ) -> RelDataType {
        ty.clone().with_charset_and_collation(charset, collation)
    }

    fn create_multiset_type(&self, element: RelDataType) -> RelDataType {
        RelDataType::new(SqlTypeName::Multiset).with_component(element)
    }

    fn create_struct_type(&self, fields: Vec<(String, RelDataType)>) -> RelDataType {
        RelDataType::new(SqlTypeName::Row).with_fields(fields)
    }

    fn least_restrictive(&self, types: &[RelDataType]) -> Option<RelDataType> {
        coercion::least_restrictive(self, types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_types_get_default_collation() {
        let factory = SqlTypeFactory::default();
        let ty = factory.create_sql_type_with_precision(SqlTypeName::Varchar, 10);
        assert_eq!(ty.precision(), Some(10));
        assert_eq!(ty.charset(), Some("ISO-8859-1"));
        assert_eq!(
            ty.collation().map(|c| c.coercibility()),
            Some(crate::Coercibility::Coercible)
        );
    }

    #[test]
    fn test_decimal_defaults_follow_config() {
        let config = TypeSystemConfig {
            default_decimal_precision: 12,
            default_decimal_scale: 3,
            ..TypeSystemConfig::default()
        };
        let factory = SqlTypeFactory::new(config);
        let ty = factory.create_sql_type(SqlTypeName::Decimal);
        assert_eq!((ty.precision(), ty.scale()), (Some(12), Some(3)));
    }

    #[test]
    fn test_precision_ignored_where_not_allowed() {
        let factory = SqlTypeFactory::default();
        let ty = factory.create_sql_type_with_precision(SqlTypeName::Integer, 7);
        assert_eq!(ty.precision(), None);
    }

    #[test]
    fn test_null_type_is_nullable() {
        let factory = SqlTypeFactory::default();
        assert!(factory.create_sql_type(SqlTypeName::Null).is_nullable());
    }
}
