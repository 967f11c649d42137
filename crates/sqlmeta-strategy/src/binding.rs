//! Operator and call bindings
//!
//! A binding is the strategies' view of one operator invocation: the operator
//! name, the operand types the validator derived and the active type factory.
//! Call bindings add the operand nodes themselves.

use crate::error::{StrategyError, StrategyResult, ValidationError};
use crate::{SqlNode, SqlOperandCountRange};
use sqlmeta_types::{RelDataType, SqlTypeName, TypeFactory};

/// Operand types of an operator invocation
pub trait SqlOperatorBinding {
    fn operator_name(&self) -> &str;

    fn operand_count(&self) -> usize;

    fn operand_type(&self, ordinal: usize) -> StrategyResult<&RelDataType>;

    fn type_factory(&self) -> &dyn TypeFactory;

    /// All operand types, in order
    fn collect_operand_types(&self) -> Vec<RelDataType> {
        (0..self.operand_count())
            .filter_map(|i| self.operand_type(i).ok().cloned())
            .collect()
    }
}

/// An operator invocation with access to its operand nodes
pub trait SqlCallBinding: SqlOperatorBinding {
    fn operands(&self) -> &[SqlNode];

    /// Allowed-signature text of the operator, used in signature errors
    fn allowed_signatures(&self) -> &str;

    fn operand(&self, ordinal: usize) -> StrategyResult<&SqlNode> {
        self.operands().get(ordinal).ok_or_else(|| {
            StrategyError::internal(format!(
                "operand {} out of range for '{}' with {} operand(s)",
                ordinal,
                self.operator_name(),
                self.operands().len()
            ))
        })
    }

    /// The validator's marker type for operands whose type is not yet known
    fn unknown_type(&self) -> RelDataType {
        self.type_factory().create_sql_type(SqlTypeName::Unknown)
    }

    /// The actual call signature, e.g. `'+(<BOOLEAN>, <INTEGER>)'`
    fn call_signature(&self) -> String {
        let types: Vec<String> = self
            .collect_operand_types()
            .iter()
            .map(|ty| format!("<{}>", ty))
            .collect();
        format!("'{}({})'", self.operator_name(), types.join(", "))
    }

    fn new_validation_signature_error(&self) -> StrategyError {
        ValidationError::Signature {
            operator: self.operator_name().to_string(),
            actual: self.call_signature(),
            allowed: self.allowed_signatures().to_string(),
        }
        .into()
    }

    fn new_wrong_arg_count_error(&self, expected: SqlOperandCountRange) -> StrategyError {
        ValidationError::WrongArgCount {
            operator: self.operator_name().to_string(),
            expected: expected.to_string(),
            actual: self.operand_count(),
        }
        .into()
    }
}

fn out_of_range(operator: &str, ordinal: usize, count: usize) -> StrategyError {
    StrategyError::internal(format!(
        "operand type {} out of range for '{}' with {} operand(s)",
        ordinal, operator, count
    ))
}

/// A call whose operand types have been derived by the validator
#[derive(Debug, Clone)]
pub struct CallBinding<'a> {
    operator: String,
    operands: Vec<SqlNode>,
    operand_types: Vec<RelDataType>,
    factory: &'a dyn TypeFactory,
    allowed_signatures: String,
}

impl<'a> CallBinding<'a> {
    /// Bind operands to their derived types; both lists must be the same length
    pub fn new(
        operator: impl Into<String>,
        operands: Vec<SqlNode>,
        operand_types: Vec<RelDataType>,
        factory: &'a dyn TypeFactory,
    ) -> StrategyResult<Self> {
        let operator = operator.into();
        if operands.len() != operand_types.len() {
            return Err(StrategyError::internal(format!(
                "'{}' has {} operand(s) but {} operand type(s)",
                operator,
                operands.len(),
                operand_types.len()
            )));
        }
        Ok(Self {
            operator,
            operands,
            operand_types,
            factory,
            allowed_signatures: String::new(),
        })
    }

    /// Bind operands, typing literals from their values and everything else as
    /// unknown
    pub fn from_operands(
        operator: impl Into<String>,
        operands: Vec<SqlNode>,
        factory: &'a dyn TypeFactory,
    ) -> Self {
        let operand_types = operands
            .iter()
            .map(|node| match node {
                SqlNode::Literal(literal) => literal.derive_type(factory),
                _ => factory.create_sql_type(SqlTypeName::Unknown),
            })
            .collect();
        Self {
            operator: operator.into(),
            operands,
            operand_types,
            factory,
            allowed_signatures: String::new(),
        }
    }

    pub fn with_allowed_signatures(mut self, allowed: impl Into<String>) -> Self {
        self.allowed_signatures = allowed.into();
        self
    }

    /// Replace the operand types, e.g. after operand-type inference
    pub fn with_operand_types(mut self, operand_types: Vec<RelDataType>) -> StrategyResult<Self> {
        if operand_types.len() != self.operands.len() {
            return Err(StrategyError::internal(format!(
                "'{}' has {} operand(s) but {} operand type(s)",
                self.operator,
                self.operands.len(),
                operand_types.len()
            )));
        }
        self.operand_types = operand_types;
        Ok(self)
    }
}

impl SqlOperatorBinding for CallBinding<'_> {
    fn operator_name(&self) -> &str {
        &self.operator
    }

    fn operand_count(&self) -> usize {
        self.operands.len()
    }

    fn operand_type(&self, ordinal: usize) -> StrategyResult<&RelDataType> {
        self.operand_types
            .get(ordinal)
            .ok_or_else(|| out_of_range(&self.operator, ordinal, self.operand_types.len()))
    }

    fn type_factory(&self) -> &dyn TypeFactory {
        self.factory
    }
}

impl SqlCallBinding for CallBinding<'_> {
    fn operands(&self) -> &[SqlNode] {
        &self.operands
    }

    fn allowed_signatures(&self) -> &str {
        &self.allowed_signatures
    }
}

/// An operator binding whose operand types are substituted explicitly
pub struct ExplicitOperatorBinding<'a> {
    delegate: &'a dyn SqlOperatorBinding,
    operand_types: Vec<RelDataType>,
}

impl<'a> ExplicitOperatorBinding<'a> {
    pub fn new(delegate: &'a dyn SqlOperatorBinding, operand_types: Vec<RelDataType>) -> Self {
        Self {
            delegate,
            operand_types,
        }
    }
}

impl SqlOperatorBinding for ExplicitOperatorBinding<'_> {
    fn operator_name(&self) -> &str {
        self.delegate.operator_name()
    }

    fn operand_count(&self) -> usize {
        self.operand_types.len()
    }

    fn operand_type(&self, ordinal: usize) -> StrategyResult<&RelDataType> {
        self.operand_types.get(ordinal).ok_or_else(|| {
            out_of_range(self.operator_name(), ordinal, self.operand_types.len())
        })
    }

    fn type_factory(&self) -> &dyn TypeFactory {
        self.delegate.type_factory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqlLiteral;
    use pretty_assertions::assert_eq;
    use sqlmeta_types::SqlTypeFactory;

    #[test]
    fn test_from_operands_types_literals() {
        let factory = SqlTypeFactory::default();
        let binding = CallBinding::from_operands(
            "+",
            vec![
                SqlNode::literal(SqlLiteral::Boolean(true)),
                SqlNode::identifier("EMPNO"),
            ],
            &factory,
        );
        assert_eq!(binding.operand_type(0).unwrap().type_name(), SqlTypeName::Boolean);
        assert_eq!(binding.operand_type(1).unwrap().type_name(), SqlTypeName::Unknown);
        assert!(binding.operand_type(2).is_err());
    }

    #[test]
    fn test_call_signature() {
        let factory = SqlTypeFactory::default();
        let binding = CallBinding::from_operands(
            "+",
            vec![
                SqlNode::literal(SqlLiteral::Boolean(true)),
                SqlNode::literal(SqlLiteral::exact(1)),
            ],
            &factory,
        );
        assert_eq!(binding.call_signature(), "'+(<BOOLEAN>, <INTEGER>)'");
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let factory = SqlTypeFactory::default();
        let result = CallBinding::new("ABS", vec![SqlNode::null()], vec![], &factory);
        assert!(matches!(result, Err(StrategyError::Internal(_))));
    }

    #[test]
    fn test_explicit_binding_substitutes_types() {
        let factory = SqlTypeFactory::default();
        let binding = CallBinding::from_operands("MULTISET UNION", vec![SqlNode::null()], &factory);
        let explicit = ExplicitOperatorBinding::new(
            &binding,
            vec![
                factory.create_sql_type(SqlTypeName::Integer),
                factory.create_sql_type(SqlTypeName::BigInt),
            ],
        );
        assert_eq!(explicit.operand_count(), 2);
        assert_eq!(explicit.operator_name(), "MULTISET UNION");
        assert_eq!(explicit.collect_operand_types().len(), 2);
    }
}
