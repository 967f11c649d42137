//! Operand strategies for SQL operators
//!
//! Reusable building blocks a validator types operator calls with:
//!
//! - **Operand count**: every checker declares the [`SqlOperandCountRange`] it accepts
//! - **Operand type checkers**: family membership, same family, comparability,
//!   literal values, multisets, set operators and AND/OR composition
//! - **Return-type inference**: operand ordinal, explicit type, least restrictive
//!   type, string concatenation precision, multiset element unification, chains
//! - **Type transforms**: nullable, not nullable, varying, multiset element type,
//!   applied in order by a [`SqlTypeTransformCascade`]
//! - **Operand-type inference**: first known type, return type, boolean
//!
//! Strategies are stateless and shared; [`strategies`] holds the standard catalogue.
//!
//! # Example
//!
//! ```ignore
//! use sqlmeta_strategy::strategies::{checkers, returns};
//! use sqlmeta_strategy::{CallBinding, SqlLiteral, SqlNode, SqlOperator};
//!
//! let plus = SqlOperator::new("+")
//!     .with_operand_type_checker(checkers::PLUS_OPERATOR.clone())
//!     .with_return_type_inference(returns::NULLABLE_PRODUCT.clone());
//!
//! let factory = SqlTypeFactory::default();
//! let operands = vec![SqlNode::literal(SqlLiteral::exact(1)), SqlNode::literal(SqlLiteral::exact(2))];
//! let binding = CallBinding::from_operands("+", operands, &factory);
//! let ty = plus.validate_call(&binding)?;
//! ```

pub mod binding;
pub mod checker;
pub mod count;
pub mod error;
pub mod node;
pub mod operand_types;
pub mod operator;
pub mod returns;
pub mod strategies;
pub mod transform;

pub use binding::{CallBinding, ExplicitOperatorBinding, SqlCallBinding, SqlOperatorBinding};
pub use checker::{
    ComparableOperandTypeChecker, CompositeOperandTypeChecker, Composition,
    FamilyOperandTypeChecker, LiteralOperandTypeChecker, MinusDateOperandTypeChecker,
    MultisetOperandTypeChecker, NonNegativeIntegerLiteralChecker, OperandTypeCheckerRef,
    RecordMultisetOperandTypeChecker, SameOperandTypeChecker, SetopOperandTypeChecker,
    SqlOperandTypeChecker, SqlSingleOperandTypeChecker, VariadicOperandTypeChecker,
};
pub use count::SqlOperandCountRange;
pub use error::{StrategyError, StrategyResult, ValidationError};
pub use node::{SqlLiteral, SqlNode};
pub use operand_types::{OperandTypeInferenceRef, SqlOperandTypeInference};
pub use operator::SqlOperator;
pub use returns::{ReturnTypeInferenceRef, SqlReturnTypeInference};
pub use transform::{SqlTypeTransform, SqlTypeTransformCascade, TypeTransformRef};
