//! Operators declared with strategies
//!
//! [`SqlOperator`] ties a name to its operand checker and inference rules, and
//! drives them in the order a validator does: operand count, operand types, then
//! return type.

use crate::binding::{CallBinding, SqlCallBinding};
use crate::checker::OperandTypeCheckerRef;
use crate::error::{StrategyError, StrategyResult};
use crate::operand_types::OperandTypeInferenceRef;
use crate::returns::ReturnTypeInferenceRef;
use crate::strategies::checkers;
use crate::{SqlNode, SqlOperandCountRange};
use log::debug;
use sqlmeta_types::{RelDataType, TypeFactory};

/// A SQL operator or function and the strategies that type it
#[derive(Debug, Clone)]
pub struct SqlOperator {
    name: String,
    return_type_inference: Option<ReturnTypeInferenceRef>,
    operand_type_inference: Option<OperandTypeInferenceRef>,
    operand_type_checker: OperandTypeCheckerRef,
}

impl SqlOperator {
    /// An operator that accepts any operands and has no return-type rule
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type_inference: None,
            operand_type_inference: None,
            operand_type_checker: checkers::VARIADIC.clone(),
        }
    }

    pub fn with_return_type_inference(mut self, rule: ReturnTypeInferenceRef) -> Self {
        self.return_type_inference = Some(rule);
        self
    }

    pub fn with_operand_type_inference(mut self, rule: OperandTypeInferenceRef) -> Self {
        self.operand_type_inference = Some(rule);
        self
    }

    pub fn with_operand_type_checker(mut self, checker: OperandTypeCheckerRef) -> Self {
        self.operand_type_checker = checker;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operand_count_range(&self) -> SqlOperandCountRange {
        self.operand_type_checker.operand_count_range()
    }

    pub fn allowed_signatures(&self) -> String {
        self.operand_type_checker.allowed_signatures(&self.name)
    }

    /// Bind a call of this operator, carrying its signatures for error messages
    pub fn bind<'a>(
        &self,
        operands: Vec<SqlNode>,
        operand_types: Vec<RelDataType>,
        factory: &'a dyn TypeFactory,
    ) -> StrategyResult<CallBinding<'a>> {
        Ok(CallBinding::new(self.name.clone(), operands, operand_types, factory)?
            .with_allowed_signatures(self.allowed_signatures()))
    }

    pub fn check_operand_count(&self, binding: &dyn SqlCallBinding) -> StrategyResult<()> {
        let range = self.operand_count_range();
        if range.is_valid_count(binding.operand_count()) {
            Ok(())
        } else {
            Err(binding.new_wrong_arg_count_error(range))
        }
    }

    pub fn check_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        fail_hard: bool,
    ) -> StrategyResult<bool> {
        self.operand_type_checker.check_operand_types(binding, fail_hard)
    }

    /// Fill in the types of untyped operands from the operator's inference rule.
    ///
    /// Returns the operand types unchanged when the operator has no rule.
    pub fn infer_operand_types(
        &self,
        binding: &dyn SqlCallBinding,
        return_type: &RelDataType,
    ) -> StrategyResult<Vec<RelDataType>> {
        let mut types = binding.collect_operand_types();
        if let Some(rule) = &self.operand_type_inference {
            rule.infer_operand_types(binding, return_type, &mut types)?;
        }
        Ok(types)
    }

    pub fn infer_return_type(
        &self,
        binding: &dyn SqlCallBinding,
    ) -> StrategyResult<Option<RelDataType>> {
        match &self.return_type_inference {
            Some(rule) => rule.infer_return_type(binding),
            None => Ok(None),
        }
    }

    /// Validate a call and derive its type
    pub fn validate_call(&self, binding: &dyn SqlCallBinding) -> StrategyResult<RelDataType> {
        debug!(
            "Validating {} with {} operand(s)",
            binding.call_signature(),
            binding.operand_count()
        );
        self.check_operand_count(binding)?;
        self.check_operand_types(binding, true)?;
        self.infer_return_type(binding)?.ok_or_else(|| {
            StrategyError::internal(format!(
                "cannot infer the return type of {}",
                binding.call_signature()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::returns;
    use crate::{SqlLiteral, ValidationError};
    use pretty_assertions::assert_eq;
    use sqlmeta_types::{SqlTypeFactory, SqlTypeName};

    fn plus() -> SqlOperator {
        SqlOperator::new("+")
            .with_operand_type_checker(checkers::PLUS_OPERATOR.clone())
            .with_return_type_inference(returns::NULLABLE_PRODUCT.clone())
    }

    fn literals(values: &[i64]) -> Vec<SqlNode> {
        values
            .iter()
            .map(|v| SqlNode::literal(SqlLiteral::exact(*v)))
            .collect()
    }

    #[test]
    fn test_validate_plus() {
        let f = SqlTypeFactory::default();
        let binding = CallBinding::from_operands("+", literals(&[1, 2]), &f);
        let ty = plus().validate_call(&binding).unwrap();
        assert_eq!(ty.type_name(), SqlTypeName::Integer);
    }

    #[test]
    fn test_wrong_arg_count() {
        let f = SqlTypeFactory::default();
        let binding = CallBinding::from_operands("+", literals(&[1, 2, 3]), &f);
        assert_eq!(
            plus().validate_call(&binding).unwrap_err(),
            StrategyError::from(ValidationError::WrongArgCount {
                operator: "+".into(),
                expected: "2".into(),
                actual: 3,
            })
        );
    }

    #[test]
    fn test_signature_error_lists_allowed_forms() {
        let f = SqlTypeFactory::default();
        let op = plus();
        let binding = op
            .bind(
                vec![SqlNode::literal(SqlLiteral::Boolean(true)), SqlNode::identifier("N")],
                vec![
                    f.create_sql_type(SqlTypeName::Boolean),
                    f.create_sql_type(SqlTypeName::Integer),
                ],
                &f,
            )
            .unwrap();
        let message = op.validate_call(&binding).unwrap_err().to_string();
        assert_eq!(
            message,
            "Cannot apply '+' to arguments of type '+(<BOOLEAN>, <INTEGER>)'. \
             Supported form(s): '+(<NUMERIC>, <NUMERIC>)'\n\
             '+(<DATETIME_INTERVAL>, <DATETIME_INTERVAL>)'"
        );
    }

    #[test]
    fn test_missing_return_rule_is_internal() {
        let f = SqlTypeFactory::default();
        let binding = CallBinding::from_operands("F", literals(&[1]), &f);
        assert!(matches!(
            SqlOperator::new("F").validate_call(&binding),
            Err(StrategyError::Internal(_))
        ));
    }

    #[test]
    fn test_infer_operand_types_without_rule_is_identity() {
        let f = SqlTypeFactory::default();
        let binding = CallBinding::from_operands("F", literals(&[1]), &f);
        let types = SqlOperator::new("F")
            .infer_operand_types(&binding, &f.create_sql_type(SqlTypeName::Boolean))
            .unwrap();
        assert_eq!(types, vec![f.create_sql_type(SqlTypeName::Integer)]);
    }
}
