//! Row expressions
//!
//! The predicate language metadata queries reason about: references to input
//! fields, literals, and calls of comparison and logical operators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operators a [`RexNode::Call`] can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RexOp {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Not,
    IsNull,
    IsNotNull,
    /// Stands for a predicate whose selectivity is already known; its single
    /// operand is a numeric literal holding that selectivity
    ArtificialSelectivity,
}

impl RexOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::ArtificialSelectivity => "ARTIFICIAL_SELECTIVITY",
        }
    }

    /// `<`, `<=`, `>` and `>=`
    pub fn is_range_comparison(&self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }

    fn is_postfix(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl fmt::Display for RexOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Literal values in row expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RexLiteral {
    Null,
    Boolean(bool),
    Numeric(f64),
    Character(String),
}

impl fmt::Display for RexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Character(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// A row expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RexNode {
    /// Reference to a field of the input row, by position
    InputRef(usize),
    Literal(RexLiteral),
    Call { op: RexOp, operands: Vec<RexNode> },
}

impl RexNode {
    pub fn input_ref(index: usize) -> Self {
        Self::InputRef(index)
    }

    pub fn literal(value: RexLiteral) -> Self {
        Self::Literal(value)
    }

    pub fn numeric(value: f64) -> Self {
        Self::Literal(RexLiteral::Numeric(value))
    }

    pub fn call(op: RexOp, operands: Vec<RexNode>) -> Self {
        Self::Call { op, operands }
    }

    pub fn equals(left: RexNode, right: RexNode) -> Self {
        Self::call(RexOp::Equals, vec![left, right])
    }

    pub fn is_not_null(operand: RexNode) -> Self {
        Self::call(RexOp::IsNotNull, vec![operand])
    }

    pub fn artificial_selectivity(selectivity: f64) -> Self {
        Self::call(RexOp::ArtificialSelectivity, vec![Self::numeric(selectivity)])
    }

    /// AND of the given conjuncts; `None` when there are none, the lone conjunct
    /// when there is one
    pub fn and(conjuncts: Vec<RexNode>) -> Option<Self> {
        let mut flat = Vec::with_capacity(conjuncts.len());
        for conjunct in conjuncts {
            match conjunct {
                Self::Call {
                    op: RexOp::And,
                    operands,
                } => flat.extend(operands),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Self::call(RexOp::And, flat)),
        }
    }

    pub fn op(&self) -> Option<RexOp> {
        match self {
            Self::Call { op, .. } => Some(*op),
            _ => None,
        }
    }

    pub fn operands(&self) -> &[RexNode] {
        match self {
            Self::Call { operands, .. } => operands,
            _ => &[],
        }
    }

    /// The conjuncts of a predicate, flattening nested ANDs
    pub fn conjunctions(&self) -> Vec<&RexNode> {
        let mut out = Vec::new();
        self.collect_conjunctions(&mut out);
        out
    }

    fn collect_conjunctions<'a>(&'a self, out: &mut Vec<&'a RexNode>) {
        match self {
            Self::Call {
                op: RexOp::And,
                operands,
            } => operands.iter().for_each(|op| op.collect_conjunctions(out)),
            other => out.push(other),
        }
    }

    /// The literal selectivity of an artificial-selectivity call
    pub fn artificial_selectivity_value(&self) -> Option<f64> {
        match self {
            Self::Call {
                op: RexOp::ArtificialSelectivity,
                operands,
            } => match operands.first() {
                Some(Self::Literal(RexLiteral::Numeric(value))) => Some(*value),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for RexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputRef(index) => write!(f, "${}", index),
            Self::Literal(lit) => write!(f, "{}", lit),
            Self::Call { op, operands } if op.is_postfix() && operands.len() == 1 => {
                write!(f, "{} {}", operands[0], op)
            }
            Self::Call { op, operands } if operands.len() == 2 => {
                write!(f, "({} {} {})", operands[0], op, operands[1])
            }
            Self::Call { op, operands } => {
                write!(f, "{}(", op)?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", operand)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_and_flattens() {
        let a = RexNode::equals(RexNode::input_ref(0), RexNode::numeric(1.0));
        let b = RexNode::is_not_null(RexNode::input_ref(1));
        let c = RexNode::artificial_selectivity(0.5);

        let ab = RexNode::and(vec![a.clone(), b.clone()]).unwrap();
        let abc = RexNode::and(vec![ab, c.clone()]).unwrap();
        assert_eq!(abc.conjunctions(), vec![&a, &b, &c]);

        assert_eq!(RexNode::and(vec![]), None);
        assert_eq!(RexNode::and(vec![a.clone()]), Some(a));
    }

    #[test]
    fn test_display() {
        let pred = RexNode::and(vec![
            RexNode::equals(RexNode::input_ref(0), RexNode::literal(RexLiteral::Character("x".into()))),
            RexNode::is_not_null(RexNode::input_ref(2)),
        ])
        .unwrap();
        assert_eq!(pred.to_string(), "(($0 = 'x') AND $2 IS NOT NULL)");
        assert_eq!(
            RexNode::artificial_selectivity(0.15).to_string(),
            "ARTIFICIAL_SELECTIVITY(0.15)"
        );
    }

    #[test]
    fn test_artificial_selectivity_value() {
        assert_eq!(
            RexNode::artificial_selectivity(0.25).artificial_selectivity_value(),
            Some(0.25)
        );
        assert_eq!(RexNode::input_ref(0).artificial_selectivity_value(), None);
    }
}
