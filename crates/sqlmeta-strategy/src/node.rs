//! Operand nodes
//!
//! The small slice of the SQL parse tree the strategies inspect: checkers look at
//! operand nodes only to tell literals (and NULL) apart from everything else; all
//! type information comes from the binding.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use sqlmeta_types::{RelDataType, SqlTypeName, TypeFactory};
use std::fmt;

/// Operator name of a cast call
pub const CAST: &str = "CAST";

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlLiteral {
    Null,
    Boolean(bool),
    /// Exact numeric, e.g. `42` or `3.14`
    Exact(Decimal),
    /// Approximate numeric, e.g. `1.5E3`
    Approximate(f64),
    Character(String),
    Binary(Vec<u8>),
}

impl SqlLiteral {
    pub fn exact(value: impl Into<Decimal>) -> Self {
        Self::Exact(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer value of an integral exact literal
    pub fn int_value(&self) -> Option<i64> {
        match self {
            Self::Exact(value) if value.fract().is_zero() => value.to_i64(),
            _ => None,
        }
    }

    /// Type the validator assigns to this literal when it appears bare
    pub fn derive_type(&self, factory: &dyn TypeFactory) -> RelDataType {
        match self {
            Self::Null => factory.create_sql_type(SqlTypeName::Null),
            Self::Boolean(_) => factory.create_sql_type(SqlTypeName::Boolean),
            Self::Exact(value) => {
                if value.fract().is_zero() {
                    match value.to_i64() {
                        Some(v) if i32::try_from(v).is_ok() => {
                            factory.create_sql_type(SqlTypeName::Integer)
                        }
                        _ => factory.create_sql_type(SqlTypeName::BigInt),
                    }
                } else {
                    let scale = value.scale();
                    let digits = value.mantissa().unsigned_abs().to_string().len() as u32;
                    factory.create_sql_type_with_precision_scale(
                        SqlTypeName::Decimal,
                        digits.max(scale),
                        scale,
                    )
                }
            }
            Self::Approximate(_) => factory.create_sql_type(SqlTypeName::Double),
            Self::Character(value) => factory.create_sql_type_with_precision(
                SqlTypeName::Char,
                value.chars().count() as u32,
            ),
            Self::Binary(value) => {
                factory.create_sql_type_with_precision(SqlTypeName::Binary, value.len() as u32)
            }
        }
    }
}

impl fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            Self::Exact(value) => write!(f, "{}", value),
            Self::Approximate(value) => write!(f, "{:E}", value),
            Self::Character(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Binary(value) => {
                write!(f, "X'")?;
                for byte in value {
                    write!(f, "{:02X}", byte)?;
                }
                write!(f, "'")
            }
        }
    }
}

/// An operand of an operator call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlNode {
    Literal(SqlLiteral),
    Identifier(String),
    /// `?` placeholder, by ordinal
    DynamicParam(usize),
    Call {
        operator: String,
        operands: Vec<SqlNode>,
    },
}

impl SqlNode {
    pub fn literal(literal: SqlLiteral) -> Self {
        Self::Literal(literal)
    }

    pub fn null() -> Self {
        Self::Literal(SqlLiteral::Null)
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn call(operator: impl Into<String>, operands: Vec<SqlNode>) -> Self {
        Self::Call {
            operator: operator.into(),
            operands,
        }
    }

    /// `CAST(node AS ...)`; the target type lives in the binding
    pub fn cast(node: SqlNode) -> Self {
        Self::call(CAST, vec![node])
    }

    /// The literal this node denotes, looking through casts
    pub fn as_literal(&self) -> Option<&SqlLiteral> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Call { operator, operands } if operator == CAST => {
                operands.first().and_then(SqlNode::as_literal)
            }
            _ => None,
        }
    }

    /// Whether this node is a literal, or a cast of one
    pub fn is_literal(&self) -> bool {
        self.as_literal().is_some()
    }

    /// Whether this node is the NULL literal. With `allow_cast`, `CAST(NULL AS ...)`
    /// counts as well.
    pub fn is_null_literal(&self, allow_cast: bool) -> bool {
        match self {
            Self::Literal(literal) => literal.is_null(),
            Self::Call { operator, operands } if allow_cast && operator == CAST => operands
                .first()
                .is_some_and(|operand| operand.is_null_literal(true)),
            _ => false,
        }
    }
}

impl fmt::Display for SqlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{}", literal),
            Self::Identifier(name) => write!(f, "{}", name),
            Self::DynamicParam(_) => write!(f, "?"),
            Self::Call { operator, operands } => {
                let operands: Vec<String> = operands.iter().map(ToString::to_string).collect();
                write!(f, "{}({})", operator, operands.join(", "))
            }
        }
    }
}

impl From<SqlLiteral> for SqlNode {
    fn from(literal: SqlLiteral) -> Self {
        Self::Literal(literal)
    }
}
