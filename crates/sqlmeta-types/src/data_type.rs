//! The concrete SQL type handle
//!
//! A [`RelDataType`] is an immutable value describing one SQL type: its name,
//! nullability, precision and scale, component type for multisets, fields for rows
//! and charset/collation for character types. Type factories build them; the
//! strategies and metadata queries only read them.

use crate::{SqlCollation, SqlTypeName, TypeFamily};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Degree of comparison a type supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Comparability {
    /// No comparison at all
    None,
    /// Equality and inequality only
    Unordered,
    /// Equality and ordering
    All,
}

/// A named field of a row type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelDataTypeField {
    pub name: String,
    pub index: usize,
    pub field_type: RelDataType,
}

/// A concrete SQL type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelDataType {
    type_name: SqlTypeName,
    nullable: bool,
    precision: Option<u32>,
    scale: Option<u32>,
    component: Option<Box<RelDataType>>,
    fields: Vec<RelDataTypeField>,
    charset: Option<String>,
    collation: Option<SqlCollation>,
}

impl RelDataType {
    // === Construction (used by type factories) ===

    /// A non-nullable type with no precision, scale or attachments
    pub fn new(type_name: SqlTypeName) -> Self {
        Self {
            type_name,
            nullable: false,
            precision: None,
            scale: None,
            component: None,
            fields: Vec::new(),
            charset: None,
            collation: None,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_component(mut self, component: RelDataType) -> Self {
        self.component = Some(Box::new(component));
        self
    }

    pub fn with_fields(mut self, fields: Vec<(String, RelDataType)>) -> Self {
        self.fields = fields
            .into_iter()
            .enumerate()
            .map(|(index, (name, field_type))| RelDataTypeField {
                name,
                index,
                field_type,
            })
            .collect();
        self
    }

    pub fn with_charset_and_collation(
        mut self,
        charset: impl Into<String>,
        collation: SqlCollation,
    ) -> Self {
        self.charset = Some(charset.into());
        self.collation = Some(collation);
        self
    }

    /// Replace the type name, keeping every other attribute
    pub fn with_type_name(mut self, type_name: SqlTypeName) -> Self {
        self.type_name = type_name;
        self
    }

    // === Accessors ===

    pub fn type_name(&self) -> SqlTypeName {
        self.type_name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// Element type of a multiset
    pub fn component_type(&self) -> Option<&RelDataType> {
        self.component.as_deref()
    }

    pub fn fields(&self) -> &[RelDataTypeField] {
        &self.fields
    }

    /// Number of fields; zero for anything but a row type
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_struct(&self) -> bool {
        self.type_name == SqlTypeName::Row
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn collation(&self) -> Option<&SqlCollation> {
        self.collation.as_ref()
    }

    // === Classification ===

    /// Families this type belongs to
    pub fn families(&self) -> SmallVec<[TypeFamily; 4]> {
        TypeFamily::families_of(self.type_name)
    }

    pub fn in_family(&self, family: TypeFamily) -> bool {
        family.contains(self)
    }

    pub fn in_char_family(&self) -> bool {
        self.type_name.is_character()
    }

    pub fn comparability(&self) -> Comparability {
        match self.type_name {
            SqlTypeName::Multiset | SqlTypeName::Row => Comparability::Unordered,
            SqlTypeName::Unknown => Comparability::None,
            _ => Comparability::All,
        }
    }

    /// Same type name, ignoring nullability, precision and attachments
    pub fn same_named_type(&self, other: &RelDataType) -> bool {
        self.type_name == other.type_name
    }

    /// Type string including nullability, e.g. `INTEGER NOT NULL`
    pub fn full_type_string(&self) -> String {
        if self.nullable {
            self.to_string()
        } else {
            format!("{} NOT NULL", self)
        }
    }
}

impl fmt::Display for RelDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name {
            SqlTypeName::Multiset => match &self.component {
                Some(component) => write!(f, "{} MULTISET", component),
                None => write!(f, "MULTISET"),
            },
            SqlTypeName::Row => {
                let fields: Vec<String> = self
                    .fields
                    .iter()
                    .map(|field| format!("{} {}", field.name, field.field_type))
                    .collect();
                write!(f, "ROW({})", fields.join(", "))
            }
            name => match (self.precision, self.scale) {
                (Some(precision), Some(scale)) => write!(f, "{}({}, {})", name, precision, scale),
                (Some(precision), None) => write!(f, "{}({})", name, precision),
                _ => write!(f, "{}", name),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let decimal = RelDataType::new(SqlTypeName::Decimal)
            .with_precision(10)
            .with_scale(2);
        assert_eq!(decimal.to_string(), "DECIMAL(10, 2)");
        assert_eq!(decimal.full_type_string(), "DECIMAL(10, 2) NOT NULL");

        let multiset = RelDataType::new(SqlTypeName::Multiset)
            .with_component(RelDataType::new(SqlTypeName::Integer));
        assert_eq!(multiset.to_string(), "INTEGER MULTISET");
    }

    #[test]
    fn test_row_fields_are_indexed() {
        let row = RelDataType::new(SqlTypeName::Row).with_fields(vec![
            ("A".to_string(), RelDataType::new(SqlTypeName::Integer)),
            ("B".to_string(), RelDataType::new(SqlTypeName::Varchar).with_precision(5)),
        ]);
        assert!(row.is_struct());
        assert_eq!(row.field_count(), 2);
        assert_eq!(row.fields()[1].index, 1);
        assert_eq!(row.to_string(), "ROW(A INTEGER, B VARCHAR(5))");
    }

    #[test]
    fn test_comparability() {
        assert_eq!(
            RelDataType::new(SqlTypeName::Integer).comparability(),
            Comparability::All
        );
        assert_eq!(
            RelDataType::new(SqlTypeName::Multiset).comparability(),
            Comparability::Unordered
        );
        assert!(Comparability::All >= Comparability::Unordered);
    }
}
