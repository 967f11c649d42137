//! Character collations and coercibility
//!
//! These concern string comparison semantics of character types. They are unrelated
//! to the sort-order collations carried by relational expressions.

use crate::{TypeError, TypeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a collation is attached to a character value, per SQL:1999 4.2.3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coercibility {
    /// Named with an explicit `COLLATE` clause
    Explicit,
    /// Derived from a column reference
    Implicit,
    /// Literals and other values that yield to any other collation
    Coercible,
    /// Two conflicting implicit collations met
    None,
}

/// A named character collation with its coercibility
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlCollation {
    name: String,
    coercibility: Coercibility,
}

impl SqlCollation {
    pub fn new(name: impl Into<String>, coercibility: Coercibility) -> Self {
        Self {
            name: name.into(),
            coercibility,
        }
    }

    /// A coercible collation, the kind attached to literals
    pub fn coercible(name: impl Into<String>) -> Self {
        Self::new(name, Coercibility::Coercible)
    }

    /// An implicit collation, the kind attached to column references
    pub fn implicit(name: impl Into<String>) -> Self {
        Self::new(name, Coercibility::Implicit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coercibility(&self) -> Coercibility {
        self.coercibility
    }

    /// Pick the collation of the result of a dyadic operator.
    ///
    /// Implements the table of SQL:1999 Part 2 Section 4.2.3. Two explicit
    /// collations with different names cannot be reconciled.
    pub fn coercibility_dyadic(left: &SqlCollation, right: &SqlCollation) -> TypeResult<SqlCollation> {
        use Coercibility::{Coercible, Explicit, Implicit};

        let picked = match (left.coercibility, right.coercibility) {
            (Coercible, Coercible) => SqlCollation::coercible(right.name.clone()),
            (Coercible, _) => right.clone(),
            (Implicit, Coercible) => left.clone(),
            (Implicit, Implicit) => {
                if left.name == right.name {
                    right.clone()
                } else {
                    SqlCollation::new(left.name.clone(), Coercibility::None)
                }
            }
            (Implicit, _) => right.clone(),
            (Coercibility::None, Explicit) => right.clone(),
            (Coercibility::None, _) => SqlCollation::new(left.name.clone(), Coercibility::None),
            (Explicit, Explicit) => {
                if left.name == right.name {
                    right.clone()
                } else {
                    return Err(TypeError::DifferentCollations {
                        left: left.to_string(),
                        right: right.to_string(),
                    });
                }
            }
            (Explicit, _) => left.clone(),
        };
        Ok(picked)
    }
}

impl fmt::Display for SqlCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name, self.coercibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EN: &str = "ISO-8859-1$en_US$primary";
    const DE: &str = "ISO-8859-1$de_DE$primary";

    #[rstest]
    #[case(SqlCollation::coercible(EN), SqlCollation::implicit(DE), SqlCollation::implicit(DE))]
    #[case(SqlCollation::implicit(EN), SqlCollation::coercible(DE), SqlCollation::implicit(EN))]
    #[case(SqlCollation::implicit(EN), SqlCollation::implicit(EN), SqlCollation::implicit(EN))]
    #[case(
        SqlCollation::new(EN, Coercibility::Explicit),
        SqlCollation::implicit(DE),
        SqlCollation::new(EN, Coercibility::Explicit)
    )]
    #[case(
        SqlCollation::implicit(EN),
        SqlCollation::implicit(DE),
        SqlCollation::new(EN, Coercibility::None)
    )]
    fn test_dyadic_table(
        #[case] left: SqlCollation,
        #[case] right: SqlCollation,
        #[case] expected: SqlCollation,
    ) {
        assert_eq!(SqlCollation::coercibility_dyadic(&left, &right).unwrap(), expected);
    }

    #[test]
    fn test_conflicting_explicit_collations() {
        let left = SqlCollation::new(EN, Coercibility::Explicit);
        let right = SqlCollation::new(DE, Coercibility::Explicit);
        assert!(matches!(
            SqlCollation::coercibility_dyadic(&left, &right),
            Err(TypeError::DifferentCollations { .. })
        ));
    }
}
