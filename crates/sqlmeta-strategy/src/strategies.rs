//! Standard strategy singletons
//!
//! The catalogue of checkers and inference rules operators are usually declared
//! with. Each is built once on first use and shared for the life of the process.

use once_cell::sync::Lazy;
use std::sync::Arc;

/// Operand type checkers
pub mod checkers {
    use super::{Arc, Lazy};
    use crate::checker::{
        ComparableOperandTypeChecker, CompositeOperandTypeChecker, FamilyOperandTypeChecker,
        LiteralOperandTypeChecker, MinusDateOperandTypeChecker, MultisetOperandTypeChecker,
        NonNegativeIntegerLiteralChecker, OperandTypeCheckerRef, RecordMultisetOperandTypeChecker,
        SameOperandTypeChecker, SetopOperandTypeChecker, VariadicOperandTypeChecker,
    };
    use sqlmeta_types::{Comparability, TypeFamily};

    type Checker = Lazy<OperandTypeCheckerRef>;

    fn family(families: &[TypeFamily]) -> OperandTypeCheckerRef {
        Arc::new(FamilyOperandTypeChecker::new(families.to_vec()))
    }

    fn and(children: Vec<OperandTypeCheckerRef>) -> OperandTypeCheckerRef {
        Arc::new(CompositeOperandTypeChecker::and(children))
    }

    fn or(children: Vec<OperandTypeCheckerRef>) -> OperandTypeCheckerRef {
        Arc::new(CompositeOperandTypeChecker::or(children))
    }

    pub static NILADIC: Checker = Lazy::new(|| family(&[]));
    pub static VARIADIC: Checker = Lazy::new(|| Arc::new(VariadicOperandTypeChecker));

    pub static BOOLEAN: Checker = Lazy::new(|| family(&[TypeFamily::Boolean]));
    pub static BOOLEAN_X2: Checker =
        Lazy::new(|| family(&[TypeFamily::Boolean, TypeFamily::Boolean]));
    pub static NUMERIC: Checker = Lazy::new(|| family(&[TypeFamily::Numeric]));
    pub static NUMERIC_X2: Checker =
        Lazy::new(|| family(&[TypeFamily::Numeric, TypeFamily::Numeric]));
    pub static BINARY: Checker = Lazy::new(|| family(&[TypeFamily::Binary]));
    pub static STRING: Checker = Lazy::new(|| family(&[TypeFamily::String]));
    pub static CHAR_STRING: Checker = Lazy::new(|| family(&[TypeFamily::Character]));
    pub static DATETIME: Checker = Lazy::new(|| family(&[TypeFamily::Datetime]));
    pub static INTERVAL: Checker = Lazy::new(|| family(&[TypeFamily::DatetimeInterval]));
    pub static MULTISET: Checker = Lazy::new(|| family(&[TypeFamily::Multiset]));
    pub static ANY: Checker = Lazy::new(|| family(&[TypeFamily::Any]));
    pub static ANY_X2: Checker = Lazy::new(|| family(&[TypeFamily::Any, TypeFamily::Any]));

    pub static NULLABLE_LITERAL: Checker =
        Lazy::new(|| Arc::new(LiteralOperandTypeChecker::new(true)));
    pub static NOT_NULL_LITERAL: Checker =
        Lazy::new(|| Arc::new(LiteralOperandTypeChecker::new(false)));
    /// A non-negative integer literal; rejects negative values with a
    /// must-be-positive error
    pub static POSITIVE_INTEGER_LITERAL: Checker =
        Lazy::new(|| Arc::new(NonNegativeIntegerLiteralChecker::default()));

    pub static SAME_X2: Checker = Lazy::new(|| Arc::new(SameOperandTypeChecker::new(2)));
    pub static SAME_X3: Checker = Lazy::new(|| Arc::new(SameOperandTypeChecker::new(3)));
    pub static COMPARABLE_ORDERED_X2: Checker =
        Lazy::new(|| Arc::new(ComparableOperandTypeChecker::new(2, Comparability::All)));
    pub static COMPARABLE_UNORDERED_X2: Checker = Lazy::new(|| {
        Arc::new(ComparableOperandTypeChecker::new(
            2,
            Comparability::Unordered,
        ))
    });

    pub static STRING_SAME_X2: Checker = Lazy::new(|| {
        and(vec![
            family(&[TypeFamily::String, TypeFamily::String]),
            SAME_X2.clone(),
        ])
    });
    pub static STRING_SAME_X3: Checker = Lazy::new(|| {
        and(vec![
            family(&[TypeFamily::String, TypeFamily::String, TypeFamily::String]),
            SAME_X3.clone(),
        ])
    });
    pub static STRING_X2_INTEGER: Checker = Lazy::new(|| {
        family(&[TypeFamily::String, TypeFamily::String, TypeFamily::Integer])
    });
    pub static STRING_X2_INTEGER_X2: Checker = Lazy::new(|| {
        family(&[
            TypeFamily::String,
            TypeFamily::String,
            TypeFamily::Integer,
            TypeFamily::Integer,
        ])
    });

    pub static INTERVAL_SAME_X2: Checker = Lazy::new(|| {
        and(vec![
            family(&[TypeFamily::DatetimeInterval, TypeFamily::DatetimeInterval]),
            SAME_X2.clone(),
        ])
    });
    pub static NUMERIC_INTERVAL: Checker =
        Lazy::new(|| family(&[TypeFamily::Numeric, TypeFamily::DatetimeInterval]));
    pub static INTERVAL_NUMERIC: Checker =
        Lazy::new(|| family(&[TypeFamily::DatetimeInterval, TypeFamily::Numeric]));
    pub static DATETIME_INTERVAL: Checker =
        Lazy::new(|| family(&[TypeFamily::Datetime, TypeFamily::DatetimeInterval]));

    pub static PLUS_OPERATOR: Checker =
        Lazy::new(|| or(vec![NUMERIC_X2.clone(), INTERVAL_SAME_X2.clone()]));
    pub static MULTIPLY_OPERATOR: Checker = Lazy::new(|| {
        or(vec![
            NUMERIC_X2.clone(),
            INTERVAL_NUMERIC.clone(),
            NUMERIC_INTERVAL.clone(),
        ])
    });
    pub static DIVISION_OPERATOR: Checker =
        Lazy::new(|| or(vec![NUMERIC_X2.clone(), INTERVAL_NUMERIC.clone()]));
    pub static MINUS_OPERATOR: Checker = Lazy::new(|| {
        or(vec![
            NUMERIC_X2.clone(),
            INTERVAL_SAME_X2.clone(),
            DATETIME_INTERVAL.clone(),
        ])
    });
    pub static MINUS_DATE_OPERATOR: Checker =
        Lazy::new(|| Arc::new(MinusDateOperandTypeChecker::default()));
    pub static NUMERIC_OR_INTERVAL: Checker =
        Lazy::new(|| or(vec![NUMERIC.clone(), INTERVAL.clone()]));

    pub static RECORD_MULTISET: Checker =
        Lazy::new(|| Arc::new(RecordMultisetOperandTypeChecker));
    pub static MULTISET_OR_RECORD_MULTISET: Checker =
        Lazy::new(|| or(vec![MULTISET.clone(), RECORD_MULTISET.clone()]));
    pub static MULTISET_X2: Checker =
        Lazy::new(|| Arc::new(MultisetOperandTypeChecker::default()));
    pub static SET_OPERATOR: Checker = Lazy::new(|| Arc::new(SetopOperandTypeChecker));
}

/// Return-type inference rules
pub mod returns {
    use super::{Arc, Lazy};
    use crate::returns::{
        DyadicStringSumPrecision, ExplicitReturnTypeInference, LeastRestrictiveReturnTypeInference,
        MatchReturnTypeInference, MultisetReturnTypeInference, OrdinalReturnTypeInference,
        ReturnTypeInferenceChain, ReturnTypeInferenceRef,
    };
    use crate::transform::{
        SqlTypeTransformCascade, ToMultisetElementType, ToNullable, ToVarying, TypeTransformRef,
    };
    use sqlmeta_types::SqlTypeName;

    type Rule = Lazy<ReturnTypeInferenceRef>;

    fn cascade(rule: &ReturnTypeInferenceRef, transforms: Vec<TypeTransformRef>) -> ReturnTypeInferenceRef {
        Arc::new(SqlTypeTransformCascade::new(rule.clone(), transforms))
    }

    fn nullable(rule: &ReturnTypeInferenceRef) -> ReturnTypeInferenceRef {
        cascade(rule, vec![Arc::new(ToNullable)])
    }

    fn explicit(name: SqlTypeName) -> ReturnTypeInferenceRef {
        Arc::new(ExplicitReturnTypeInference::new(name))
    }

    pub static FIRST_ARG: Rule = Lazy::new(|| Arc::new(OrdinalReturnTypeInference::new(0)));
    pub static NULLABLE_FIRST_ARG: Rule = Lazy::new(|| nullable(&FIRST_ARG));
    pub static FIRST_INTERVAL: Rule = Lazy::new(|| {
        Arc::new(MatchReturnTypeInference::new(0, SqlTypeName::INTERVAL_TYPES))
    });
    pub static NULLABLE_FIRST_INTERVAL: Rule = Lazy::new(|| nullable(&FIRST_INTERVAL));
    pub static NULLABLE_VARYING_FIRST_ARG: Rule = Lazy::new(|| {
        cascade(&FIRST_ARG, vec![Arc::new(ToNullable), Arc::new(ToVarying)])
    });
    pub static SECOND_ARG: Rule = Lazy::new(|| Arc::new(OrdinalReturnTypeInference::new(1)));
    pub static THIRD_ARG: Rule = Lazy::new(|| Arc::new(OrdinalReturnTypeInference::new(2)));

    pub static BOOLEAN: Rule = Lazy::new(|| explicit(SqlTypeName::Boolean));
    pub static NULLABLE_BOOLEAN: Rule = Lazy::new(|| nullable(&BOOLEAN));
    pub static DATE: Rule = Lazy::new(|| explicit(SqlTypeName::Date));
    pub static TIME: Rule = Lazy::new(|| {
        Arc::new(ExplicitReturnTypeInference::with_precision(SqlTypeName::Time, 0))
    });
    pub static NULLABLE_TIME: Rule = Lazy::new(|| nullable(&TIME));
    pub static DOUBLE: Rule = Lazy::new(|| explicit(SqlTypeName::Double));
    pub static NULLABLE_DOUBLE: Rule = Lazy::new(|| nullable(&DOUBLE));
    pub static INTEGER: Rule = Lazy::new(|| explicit(SqlTypeName::Integer));
    pub static NULLABLE_INTEGER: Rule = Lazy::new(|| nullable(&INTEGER));
    pub static VARCHAR_2000: Rule = Lazy::new(|| {
        Arc::new(ExplicitReturnTypeInference::with_precision(
            SqlTypeName::Varchar,
            2000,
        ))
    });

    pub static LEAST_RESTRICTIVE: Rule =
        Lazy::new(|| Arc::new(LeastRestrictiveReturnTypeInference));
    /// First interval operand if any, otherwise the least restrictive type
    pub static NULLABLE_PRODUCT: Rule = Lazy::new(|| {
        Arc::new(ReturnTypeInferenceChain::new(vec![
            NULLABLE_FIRST_INTERVAL.clone(),
            LEAST_RESTRICTIVE.clone(),
        ]))
    });

    pub static DYADIC_STRING_SUM_PRECISION: Rule =
        Lazy::new(|| Arc::new(DyadicStringSumPrecision));
    pub static NULLABLE_DYADIC_STRING_SUM_PRECISION: Rule =
        Lazy::new(|| nullable(&DYADIC_STRING_SUM_PRECISION));
    pub static NULLABLE_VARYING_DYADIC_STRING_SUM_PRECISION: Rule = Lazy::new(|| {
        cascade(
            &DYADIC_STRING_SUM_PRECISION,
            vec![Arc::new(ToNullable), Arc::new(ToVarying)],
        )
    });

    pub static MULTISET: Rule = Lazy::new(|| Arc::new(MultisetReturnTypeInference));
    pub static NULLABLE_MULTISET: Rule = Lazy::new(|| nullable(&MULTISET));
    pub static MULTISET_ELEMENT_TYPE: Rule =
        Lazy::new(|| cascade(&MULTISET, vec![Arc::new(ToMultisetElementType)]));
}

/// Operand-type inference rules
pub mod operand_types {
    use super::{Arc, Lazy};
    use crate::operand_types::{
        BooleanOperandTypeInference, FirstKnownOperandTypeInference, OperandTypeInferenceRef,
        ReturnTypeOperandTypeInference,
    };

    type Rule = Lazy<OperandTypeInferenceRef>;

    pub static FIRST_KNOWN: Rule = Lazy::new(|| Arc::new(FirstKnownOperandTypeInference));
    pub static RETURN_TYPE: Rule = Lazy::new(|| Arc::new(ReturnTypeOperandTypeInference));
    pub static BOOLEAN: Rule = Lazy::new(|| Arc::new(BooleanOperandTypeInference));
}
