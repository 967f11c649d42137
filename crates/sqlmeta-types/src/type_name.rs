//! SQL type names

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a SQL type, independent of precision, nullability or collation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlTypeName {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Real,
    Float,
    Double,
    Date,
    Time,
    Timestamp,
    IntervalYearMonth,
    IntervalDayTime,
    Char,
    Varchar,
    Binary,
    Varbinary,
    Multiset,
    Row,
    /// Type of the untyped `NULL` literal
    Null,
    /// Marker the validator assigns to an operand whose type is not yet known
    Unknown,
    Any,
}

impl SqlTypeName {
    /// Every type name, in declaration order
    pub const ALL: &'static [SqlTypeName] = &[
        Self::Boolean,
        Self::TinyInt,
        Self::SmallInt,
        Self::Integer,
        Self::BigInt,
        Self::Decimal,
        Self::Real,
        Self::Float,
        Self::Double,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::IntervalYearMonth,
        Self::IntervalDayTime,
        Self::Char,
        Self::Varchar,
        Self::Binary,
        Self::Varbinary,
        Self::Multiset,
        Self::Row,
        Self::Null,
        Self::Unknown,
        Self::Any,
    ];

    /// Interval type names
    pub const INTERVAL_TYPES: &'static [SqlTypeName] =
        &[Self::IntervalYearMonth, Self::IntervalDayTime];

    /// SQL spelling of the type name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Real => "REAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::IntervalYearMonth => "INTERVAL_YEAR_MONTH",
            Self::IntervalDayTime => "INTERVAL_DAY_TIME",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::Varbinary => "VARBINARY",
            Self::Multiset => "MULTISET",
            Self::Row => "ROW",
            Self::Null => "NULL",
            Self::Unknown => "UNKNOWN",
            Self::Any => "ANY",
        }
    }

    // === Classification ===

    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Char | Self::Varchar)
    }

    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary | Self::Varbinary)
    }

    pub const fn is_exact_integer(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt
        )
    }

    pub const fn is_exact_numeric(&self) -> bool {
        self.is_exact_integer() || matches!(self, Self::Decimal)
    }

    pub const fn is_approximate_numeric(&self) -> bool {
        matches!(self, Self::Real | Self::Float | Self::Double)
    }

    pub const fn is_numeric(&self) -> bool {
        self.is_exact_numeric() || self.is_approximate_numeric()
    }

    pub const fn is_datetime(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }

    pub const fn is_interval(&self) -> bool {
        matches!(self, Self::IntervalYearMonth | Self::IntervalDayTime)
    }

    /// Whether a precision may be attached to this type
    pub const fn allows_precision(&self) -> bool {
        matches!(
            self,
            Self::Decimal
                | Self::Time
                | Self::Timestamp
                | Self::Char
                | Self::Varchar
                | Self::Binary
                | Self::Varbinary
        )
    }

    /// Whether a scale may be attached to this type
    pub const fn allows_scale(&self) -> bool {
        matches!(self, Self::Decimal)
    }

    /// Number of decimal digits an exact integer type can hold
    pub const fn integer_digits(&self) -> Option<u32> {
        match self {
            Self::TinyInt => Some(3),
            Self::SmallInt => Some(5),
            Self::Integer => Some(10),
            Self::BigInt => Some(19),
            _ => None,
        }
    }

    /// The fixed-length counterpart's varying form (CHAR -> VARCHAR, BINARY -> VARBINARY)
    pub const fn to_varying(&self) -> SqlTypeName {
        match self {
            Self::Char => Self::Varchar,
            Self::Binary => Self::Varbinary,
            other => *other,
        }
    }
}

impl fmt::Display for SqlTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
