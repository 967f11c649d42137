//! Type family taxonomy
//!
//! A [`TypeFamily`] is a broad category of SQL types used to classify operands
//! independently of their exact type. Membership is a fixed table keyed by
//! [`SqlTypeName`]; it is checked, never inferred.

use crate::{RelDataType, SqlTypeName};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A broad category of SQL types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFamily {
    Character,
    Binary,
    /// Character or binary strings
    String,
    Numeric,
    ExactNumeric,
    ApproximateNumeric,
    Integer,
    Boolean,
    Date,
    Time,
    Timestamp,
    Datetime,
    DatetimeInterval,
    Multiset,
    Row,
    /// Every type except the validator's unknown marker
    Any,
}

use SqlTypeName as N;

const CHARACTER: &[SqlTypeName] = &[N::Char, N::Varchar];
const BINARY: &[SqlTypeName] = &[N::Binary, N::Varbinary];
const STRING: &[SqlTypeName] = &[N::Char, N::Varchar, N::Binary, N::Varbinary];
const EXACT_NUMERIC: &[SqlTypeName] =
    &[N::TinyInt, N::SmallInt, N::Integer, N::BigInt, N::Decimal];
const APPROXIMATE_NUMERIC: &[SqlTypeName] = &[N::Real, N::Float, N::Double];
const NUMERIC: &[SqlTypeName] = &[
    N::TinyInt,
    N::SmallInt,
    N::Integer,
    N::BigInt,
    N::Decimal,
    N::Real,
    N::Float,
    N::Double,
];
const INTEGER: &[SqlTypeName] = &[N::TinyInt, N::SmallInt, N::Integer, N::BigInt];
const BOOLEAN: &[SqlTypeName] = &[N::Boolean];
const DATE: &[SqlTypeName] = &[N::Date];
const TIME: &[SqlTypeName] = &[N::Time];
const TIMESTAMP: &[SqlTypeName] = &[N::Timestamp];
const DATETIME: &[SqlTypeName] = &[N::Date, N::Time, N::Timestamp];
const DATETIME_INTERVAL: &[SqlTypeName] = &[N::IntervalYearMonth, N::IntervalDayTime];
const MULTISET: &[SqlTypeName] = &[N::Multiset];
const ROW: &[SqlTypeName] = &[N::Row];
const ANY: &[SqlTypeName] = &[
    N::Boolean,
    N::TinyInt,
    N::SmallInt,
    N::Integer,
    N::BigInt,
    N::Decimal,
    N::Real,
    N::Float,
    N::Double,
    N::Date,
    N::Time,
    N::Timestamp,
    N::IntervalYearMonth,
    N::IntervalDayTime,
    N::Char,
    N::Varchar,
    N::Binary,
    N::Varbinary,
    N::Multiset,
    N::Row,
    N::Null,
    N::Any,
];

impl TypeFamily {
    /// Every family, in declaration order
    pub const ALL: &'static [TypeFamily] = &[
        Self::Character,
        Self::Binary,
        Self::String,
        Self::Numeric,
        Self::ExactNumeric,
        Self::ApproximateNumeric,
        Self::Integer,
        Self::Boolean,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::Datetime,
        Self::DatetimeInterval,
        Self::Multiset,
        Self::Row,
        Self::Any,
    ];

    /// The type names belonging to this family
    pub const fn type_names(&self) -> &'static [SqlTypeName] {
        match self {
            Self::Character => CHARACTER,
            Self::Binary => BINARY,
            Self::String => STRING,
            Self::Numeric => NUMERIC,
            Self::ExactNumeric => EXACT_NUMERIC,
            Self::ApproximateNumeric => APPROXIMATE_NUMERIC,
            Self::Integer => INTEGER,
            Self::Boolean => BOOLEAN,
            Self::Date => DATE,
            Self::Time => TIME,
            Self::Timestamp => TIMESTAMP,
            Self::Datetime => DATETIME,
            Self::DatetimeInterval => DATETIME_INTERVAL,
            Self::Multiset => MULTISET,
            Self::Row => ROW,
            Self::Any => ANY,
        }
    }

    /// Signature placeholder used in allowed-signature messages, e.g. `<NUMERIC>`
    pub const fn signature_name(&self) -> &'static str {
        match self {
            Self::Character => "<CHARACTER>",
            Self::Binary => "<BINARY>",
            Self::String => "<STRING>",
            Self::Numeric => "<NUMERIC>",
            Self::ExactNumeric => "<EXACT_NUMERIC>",
            Self::ApproximateNumeric => "<APPROXIMATE_NUMERIC>",
            Self::Integer => "<INTEGER>",
            Self::Boolean => "<BOOLEAN>",
            Self::Date => "<DATE>",
            Self::Time => "<TIME>",
            Self::Timestamp => "<TIMESTAMP>",
            Self::Datetime => "<DATETIME>",
            Self::DatetimeInterval => "<DATETIME_INTERVAL>",
            Self::Multiset => "<MULTISET>",
            Self::Row => "<ROW>",
            Self::Any => "<ANY>",
        }
    }

    /// Check whether a type name belongs to this family
    pub fn contains_name(&self, name: SqlTypeName) -> bool {
        self.type_names().contains(&name)
    }

    /// Check whether a concrete type belongs to this family
    pub fn contains(&self, ty: &RelDataType) -> bool {
        self.contains_name(ty.type_name())
    }

    /// The single family a type name is classified under for same-family checks.
    ///
    /// Wider families such as `Numeric` or `Datetime` are not used here: `DATE` and
    /// `TIME` are both datetimes yet cannot be compared. NULL, UNKNOWN and ANY have
    /// no primary family.
    pub const fn primary(name: SqlTypeName) -> Option<TypeFamily> {
        match name {
            N::Char | N::Varchar => Some(Self::Character),
            N::Binary | N::Varbinary => Some(Self::Binary),
            N::TinyInt
            | N::SmallInt
            | N::Integer
            | N::BigInt
            | N::Decimal
            | N::Real
            | N::Float
            | N::Double => Some(Self::Numeric),
            N::Boolean => Some(Self::Boolean),
            N::Date => Some(Self::Date),
            N::Time => Some(Self::Time),
            N::Timestamp => Some(Self::Timestamp),
            N::IntervalYearMonth | N::IntervalDayTime => Some(Self::DatetimeInterval),
            N::Multiset => Some(Self::Multiset),
            N::Row => Some(Self::Row),
            N::Null | N::Unknown | N::Any => None,
        }
    }

    /// All families a type name belongs to
    pub fn families_of(name: SqlTypeName) -> SmallVec<[TypeFamily; 4]> {
        Self::ALL
            .iter()
            .copied()
            .filter(|family| family.contains_name(name))
            .collect()
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.signature_name();
        f.write_str(&name[1..name.len() - 1])
    }
}
