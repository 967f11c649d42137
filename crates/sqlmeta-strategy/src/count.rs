//! Operand-count contracts

use serde::{Deserialize, Serialize};
use std::fmt;

/// The number of operands a checker accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlOperandCountRange {
    min: usize,
    /// `None` when unbounded
    max: Option<usize>,
}

impl SqlOperandCountRange {
    pub const NILADIC: Self = Self::fixed(0);
    pub const ONE: Self = Self::fixed(1);
    pub const TWO: Self = Self::fixed(2);
    pub const THREE: Self = Self::fixed(3);
    pub const VARIADIC: Self = Self::variadic();

    pub const fn fixed(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub const fn variadic() -> Self {
        Self::at_least(0)
    }

    pub const fn min(&self) -> usize {
        self.min
    }

    pub const fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn is_variadic(&self) -> bool {
        self.max.is_none()
    }

    pub fn is_valid_count(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    /// Counts accepted by either range (spanning any gap between them)
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.max(b)),
                _ => None,
            },
        }
    }

    /// Counts accepted by both ranges; may accept nothing
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min: self.min.max(other.min),
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (Some(a), None) | (None, Some(a)) => Some(a),
                (None, None) => None,
            },
        }
    }
}

impl fmt::Display for SqlOperandCountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{} to {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SqlOperandCountRange::TWO, 2, true)]
    #[case(SqlOperandCountRange::TWO, 3, false)]
    #[case(SqlOperandCountRange::between(1, 3), 0, false)]
    #[case(SqlOperandCountRange::between(1, 3), 3, true)]
    #[case(SqlOperandCountRange::VARIADIC, 0, true)]
    #[case(SqlOperandCountRange::VARIADIC, 99, true)]
    fn test_valid_counts(
        #[case] range: SqlOperandCountRange,
        #[case] count: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(range.is_valid_count(count), expected);
    }

    #[test]
    fn test_combinations() {
        let one = SqlOperandCountRange::ONE;
        let two = SqlOperandCountRange::TWO;
        assert_eq!(one.union(&two), SqlOperandCountRange::between(1, 2));
        assert_eq!(
            SqlOperandCountRange::VARIADIC.intersect(&two),
            SqlOperandCountRange::TWO
        );
        assert!(!one.intersect(&two).is_valid_count(1));
        assert!(!one.intersect(&two).is_valid_count(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(SqlOperandCountRange::TWO.to_string(), "2");
        assert_eq!(SqlOperandCountRange::between(1, 3).to_string(), "1 to 3");
        assert_eq!(SqlOperandCountRange::VARIADIC.to_string(), "at least 0");
    }
}
