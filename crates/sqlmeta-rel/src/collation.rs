//! Sort-order guarantees
//!
//! A [`RelCollation`] is an ordered list of `(field, direction)` pairs describing how
//! the rows a relational expression produces are sorted. An expression may satisfy
//! several collations at once, so APIs take slices of them.

use crate::error::{CollationError, CollationResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlmeta_types::RelDataType;
use std::fmt;

static SINGLETON_0: Lazy<Vec<RelCollation>> = Lazy::new(|| RelCollation::singleton(0));

/// Sort direction of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn short_string(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_string())
    }
}

/// Ordering of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelFieldCollation {
    field_index: usize,
    direction: Direction,
}

impl RelFieldCollation {
    pub fn new(field_index: usize, direction: Direction) -> Self {
        Self {
            field_index,
            direction,
        }
    }

    pub fn ascending(field_index: usize) -> Self {
        Self::new(field_index, Direction::Ascending)
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The same ordering on a field `offset` positions away, if that position exists
    pub fn shift(&self, offset: isize) -> Option<Self> {
        self.field_index
            .checked_add_signed(offset)
            .map(|field_index| Self::new(field_index, self.direction))
    }
}

impl fmt::Display for RelFieldCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field_index, self.direction)
    }
}

/// An ordered list of field orderings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RelCollation {
    field_collations: Vec<RelFieldCollation>,
}

impl RelCollation {
    /// The collation that promises nothing
    pub const EMPTY: RelCollation = RelCollation {
        field_collations: Vec::new(),
    };

    pub fn new(field_collations: Vec<RelFieldCollation>) -> Self {
        Self { field_collations }
    }

    pub fn field_collations(&self) -> &[RelFieldCollation] {
        &self.field_collations
    }

    pub fn is_empty(&self) -> bool {
        self.field_collations.is_empty()
    }

    /// One collation ordering by `field_index` ascending
    pub fn singleton(field_index: usize) -> Vec<RelCollation> {
        vec![Self::new(vec![RelFieldCollation::ascending(field_index)])]
    }

    /// Ordering by the zeroth field
    pub fn singleton_0() -> &'static [RelCollation] {
        &SINGLETON_0
    }

    /// Check that every field a collation mentions exists in `row_type`.
    ///
    /// With `fail` set, the first out-of-range field is an error; otherwise it makes
    /// the result `false`.
    pub fn is_valid(
        row_type: &RelDataType,
        collations: &[RelCollation],
        fail: bool,
    ) -> CollationResult<bool> {
        let field_count = row_type.field_count();
        let out_of_range = collations
            .iter()
            .flat_map(|collation| collation.field_collations.iter())
            .find(|fc| fc.field_index >= field_count);

        match out_of_range {
            None => Ok(true),
            Some(fc) if fail => Err(CollationError::FieldIndexOutOfRange {
                index: fc.field_index,
                field_count,
            }),
            Some(_) => Ok(false),
        }
    }

    pub fn equal(left: &[RelCollation], right: &[RelCollation]) -> bool {
        left == right
    }
}

impl fmt::Display for RelCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, fc) in self.field_collations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", fc)?;
        }
        f.write_str("]")
    }
}

impl From<Vec<RelFieldCollation>> for RelCollation {
    fn from(field_collations: Vec<RelFieldCollation>) -> Self {
        Self::new(field_collations)
    }
}
