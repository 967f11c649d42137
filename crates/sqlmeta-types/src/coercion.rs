//! Least-restrictive type computation
//!
//! Implements the SQL:1999 rules of Part 2 Section 9.3 "Data types of results of
//! aggregations", used wherever several operand types must be merged into one
//! (UNION, CASE, multiset element unification, ...):
//! - NULL-typed inputs are ignored except that they make the result nullable
//! - Character and binary strings widen to the varying form with the largest precision
//! - Any approximate numeric yields DOUBLE; exact numerics yield the widest integer
//!   type or a DECIMAL covering every input
//! - Datetime and interval types must agree on their exact name
//! - Multisets unify their element types, rows unify field by field

use crate::{RelDataType, SqlCollation, SqlTypeName, TypeFactory};

/// Compute the least restrictive type of `types`, or `None` when no such type exists
pub fn least_restrictive(factory: &dyn TypeFactory, types: &[RelDataType]) -> Option<RelDataType> {
    if types.is_empty() {
        return None;
    }

    let nullable = types
        .iter()
        .any(|t| t.is_nullable() || t.type_name() == SqlTypeName::Null);
    let candidates: Vec<&RelDataType> = types
        .iter()
        .filter(|t| t.type_name() != SqlTypeName::Null)
        .collect();

    if candidates.iter().any(|t| t.type_name() == SqlTypeName::Unknown) {
        return None;
    }

    let Some(first) = candidates.first() else {
        return Some(factory.create_sql_type(SqlTypeName::Null));
    };

    let result = if candidates.iter().any(|t| t.type_name() == SqlTypeName::Any) {
        Some(factory.create_sql_type(SqlTypeName::Any))
    } else if first.type_name().is_character() {
        strings(factory, &candidates, SqlTypeName::is_character, SqlTypeName::Char)
    } else if first.type_name().is_binary() {
        strings(factory, &candidates, SqlTypeName::is_binary, SqlTypeName::Binary)
    } else if first.type_name().is_numeric() {
        numerics(factory, &candidates)
    } else {
        match first.type_name() {
            SqlTypeName::Multiset => multisets(factory, &candidates),
            SqlTypeName::Row => rows(factory, &candidates),
            name => same_name(&candidates, name),
        }
    }?;

    Some(factory.create_type_with_nullability(&result, nullable))
}

fn strings(
    factory: &dyn TypeFactory,
    types: &[&RelDataType],
    in_family: fn(&SqlTypeName) -> bool,
    fixed: SqlTypeName,
) -> Option<RelDataType> {
    if !types.iter().all(|t| in_family(&t.type_name())) {
        return None;
    }

    let first = types[0];
    if types.iter().any(|t| t.charset() != first.charset()) {
        return None;
    }

    let all_fixed = types.iter().all(|t| t.type_name() == fixed);
    let name = if all_fixed { fixed } else { fixed.to_varying() };
    let precision = types.iter().filter_map(|t| t.precision()).max();

    let mut result = match precision {
        Some(precision) => factory.create_sql_type_with_precision(name, precision),
        None => factory.create_sql_type(name),
    };

    if let (Some(charset), Some(mut collation)) = (first.charset(), first.collation().cloned()) {
        for other in &types[1..] {
            if let Some(next) = other.collation() {
                collation = SqlCollation::coercibility_dyadic(&collation, next).ok()?;
            }
        }
        result = factory.create_type_with_charset_and_collation(&result, charset, collation);
    }
    Some(result)
}

fn numerics(factory: &dyn TypeFactory, types: &[&RelDataType]) -> Option<RelDataType> {
    if !types.iter().all(|t| t.type_name().is_numeric()) {
        return None;
    }

    if types.iter().any(|t| t.type_name().is_approximate_numeric()) {
        return Some(factory.create_sql_type(SqlTypeName::Double));
    }

    if types.iter().all(|t| t.type_name().is_exact_integer()) {
        let widest = types
            .iter()
            .map(|t| t.type_name())
            .max_by_key(|name| name.integer_digits().unwrap_or(0))?;
        return Some(factory.create_sql_type(widest));
    }

    let mut scale = 0;
    let mut integer_digits = 0;
    for ty in types {
        let (p, s) = match ty.type_name().integer_digits() {
            Some(digits) => (digits, 0),
            None => (ty.precision().unwrap_or(0), ty.scale().unwrap_or(0)),
        };
        scale = scale.max(s);
        integer_digits = integer_digits.max(p.saturating_sub(s));
    }
    let max_precision = factory.config().max_numeric_precision;
    let precision = (integer_digits + scale).min(max_precision);
    let scale = scale.min(precision);
    Some(factory.create_sql_type_with_precision_scale(
        SqlTypeName::Decimal,
        precision,
        scale,
    ))
}

fn same_name(types: &[&RelDataType], name: SqlTypeName) -> Option<RelDataType> {
    if !types.iter().all(|t| t.type_name() == name) {
        return None;
    }
    let precision = types.iter().filter_map(|t| t.precision()).max();
    let result = types[0].clone();
    Some(match precision {
        Some(precision) => result.with_precision(precision),
        None => result,
    })
}

fn multisets(factory: &dyn TypeFactory, types: &[&RelDataType]) -> Option<RelDataType> {
    let elements: Option<Vec<RelDataType>> = types
        .iter()
        .map(|t| {
            if t.type_name() == SqlTypeName::Multiset {
                t.component_type().cloned()
            } else {
                None
            }
        })
        .collect();
    let element = least_restrictive(factory, &elements?)?;
    Some(factory.create_multiset_type(element))
}

fn rows(factory: &dyn TypeFactory, types: &[&RelDataType]) -> Option<RelDataType> {
    let first = types[0];
    if !types
        .iter()
        .all(|t| t.is_struct() && t.field_count() == first.field_count())
    {
        return None;
    }

    let mut fields = Vec::with_capacity(first.field_count());
    for (i, field) in first.fields().iter().enumerate() {
        let column: Vec<RelDataType> = types
            .iter()
            .map(|t| t.fields()[i].field_type.clone())
            .collect();
        fields.push((field.name.clone(), least_restrictive(factory, &column)?));
    }
    Some(factory.create_struct_type(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqlTypeFactory;
    use pretty_assertions::assert_eq;

    fn factory() -> SqlTypeFactory {
        SqlTypeFactory::default()
    }

    #[test]
    fn test_widest_integer() {
        let f = factory();
        let types = [
            f.create_sql_type(SqlTypeName::SmallInt),
            f.create_sql_type(SqlTypeName::BigInt),
            f.create_sql_type(SqlTypeName::Integer),
        ];
        assert_eq!(
            least_restrictive(&f, &types).map(|t| t.type_name()),
            Some(SqlTypeName::BigInt)
        );
    }

    #[test]
    fn test_integer_and_decimal() {
        let f = factory();
        let types = [
            f.create_sql_type(SqlTypeName::Integer),
            f.create_sql_type_with_precision_scale(SqlTypeName::Decimal, 5, 2),
        ];
        let result = least_restrictive(&f, &types).unwrap();
        assert_eq!(result.type_name(), SqlTypeName::Decimal);
        // 10 integer digits plus 2 fractional digits
        assert_eq!((result.precision(), result.scale()), (Some(12), Some(2)));
    }

    #[test]
    fn test_approximate_wins() {
        let f = factory();
        let types = [
            f.create_sql_type(SqlTypeName::Integer),
            f.create_sql_type(SqlTypeName::Real),
        ];
        assert_eq!(
            least_restrictive(&f, &types).map(|t| t.type_name()),
            Some(SqlTypeName::Double)
        );
    }

    #[test]
    fn test_char_widens_to_varchar() {
        let f = factory();
        let types = [
            f.create_sql_type_with_precision(SqlTypeName::Char, 3),
            f.create_sql_type_with_precision(SqlTypeName::Varchar, 10),
        ];
        let result = least_restrictive(&f, &types).unwrap();
        assert_eq!(result.type_name(), SqlTypeName::Varchar);
        assert_eq!(result.precision(), Some(10));
        assert_eq!(result.charset(), Some("ISO-8859-1"));
    }

    #[test]
    fn test_null_makes_nullable() {
        let f = factory();
        let types = [
            f.create_sql_type(SqlTypeName::Null),
            f.create_sql_type(SqlTypeName::Integer),
        ];
        let result = least_restrictive(&f, &types).unwrap();
        assert_eq!(result.type_name(), SqlTypeName::Integer);
        assert!(result.is_nullable());
    }

    #[test]
    fn test_mixed_families_have_no_common_type() {
        let f = factory();
        let types = [
            f.create_sql_type(SqlTypeName::Integer),
            f.create_sql_type_with_precision(SqlTypeName::Varchar, 5),
        ];
        assert_eq!(least_restrictive(&f, &types), None);
    }

    #[test]
    fn test_multiset_elements_unify() {
        let f = factory();
        let types = [
            f.create_multiset_type(f.create_sql_type(SqlTypeName::Integer)),
            f.create_multiset_type(f.create_sql_type(SqlTypeName::BigInt)),
        ];
        let result = least_restrictive(&f, &types).unwrap();
        assert_eq!(
            result.component_type().map(|t| t.type_name()),
            Some(SqlTypeName::BigInt)
        );
    }

    #[test]
    fn test_rows_need_equal_field_counts() {
        let f = factory();
        let one = f.create_struct_type(vec![("A".into(), f.create_sql_type(SqlTypeName::Integer))]);
        let two = f.create_struct_type(vec![
            ("A".into(), f.create_sql_type(SqlTypeName::Integer)),
            ("B".into(), f.create_sql_type(SqlTypeName::Integer)),
        ]);
        assert_eq!(least_restrictive(&f, &[one.clone(), two]), None);
        assert_eq!(least_restrictive(&f, &[one.clone(), one.clone()]), Some(one));
    }
}
