//! AND/OR composition of checkers

use super::{OperandTypeCheckerRef, SqlOperandTypeChecker, SqlSingleOperandTypeChecker};
use crate::{SqlCallBinding, SqlOperandCountRange, StrategyError, StrategyResult};

/// How the children of a composite combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Every child must pass
    And,
    /// At least one child must pass; the first success wins
    Or,
}

/// A checker combining child checkers with AND or OR
#[derive(Debug, Clone)]
pub struct CompositeOperandTypeChecker {
    composition: Composition,
    children: Vec<OperandTypeCheckerRef>,
}

impl CompositeOperandTypeChecker {
    pub fn new(composition: Composition, children: Vec<OperandTypeCheckerRef>) -> Self {
        Self {
            composition,
            children,
        }
    }

    pub fn and(children: Vec<OperandTypeCheckerRef>) -> Self {
        Self::new(Composition::And, children)
    }

    pub fn or(children: Vec<OperandTypeCheckerRef>) -> Self {
        Self::new(Composition::Or, children)
    }

    pub fn composition(&self) -> Composition {
        self.composition
    }

    pub fn children(&self) -> &[OperandTypeCheckerRef] {
        &self.children
    }

    /// Shared AND/OR evaluation over a per-child check.
    ///
    /// For OR, children are first tried softly. When all fail and `fail_hard` is
    /// set, they are re-run hard so the first specific failure surfaces; if none
    /// raises one, a generic signature error is reported.
    fn evaluate<F>(&self, binding: &dyn SqlCallBinding, fail_hard: bool, check: F) -> StrategyResult<bool>
    where
        F: Fn(&OperandTypeCheckerRef, bool) -> StrategyResult<bool>,
    {
        match self.composition {
            Composition::And => {
                for child in &self.children {
                    if !check(child, fail_hard)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Composition::Or => {
                for child in &self.children {
                    if check(child, false)? {
                        return Ok(true);
                    }
                }
                if !fail_hard {
                    return Ok(false);
                }
                for child in &self.children {
                    check(child, true)?;
                }
                Err(binding.new_validation_signature_error())
            }
        }
    }
}

impl SqlOperandTypeChecker for CompositeOperandTypeChecker {
    fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        self.evaluate(binding, fail_hard, |child, hard| {
            child.check_operand_types(binding, hard)
        })
    }

    fn operand_count_range(&self) -> SqlOperandCountRange {
        let mut ranges = self.children.iter().map(|c| c.operand_count_range());
        let Some(first) = ranges.next() else {
            return SqlOperandCountRange::VARIADIC;
        };
        ranges.fold(first, |acc, range| match self.composition {
            Composition::And => acc.intersect(&range),
            Composition::Or => acc.union(&range),
        })
    }

    fn allowed_signatures(&self, op_name: &str) -> String {
        match self.composition {
            Composition::And => self
                .children
                .first()
                .map(|child| child.allowed_signatures(op_name))
                .unwrap_or_default(),
            Composition::Or => self
                .children
                .iter()
                .map(|child| child.allowed_signatures(op_name))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn as_single(&self) -> Option<&dyn SqlSingleOperandTypeChecker> {
        if self.children.iter().all(|c| c.as_single().is_some()) {
            Some(self)
        } else {
            None
        }
    }
}

impl SqlSingleOperandTypeChecker for CompositeOperandTypeChecker {
    fn check_single_operand_type(
        &self,
        binding: &dyn SqlCallBinding,
        ordinal: usize,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        self.evaluate(binding, fail_hard, |child, hard| {
            let single = child.as_single().ok_or_else(|| {
                StrategyError::internal(format!(
                    "{:?} cannot check operand {} in isolation",
                    child, ordinal
                ))
            })?;
            single.check_single_operand_type(binding, ordinal, hard)
        })
    }
}
