//! Arithmetic over possibly-unknown estimates
//!
//! A missing statistic stays missing: any `None` operand makes the result `None`.

pub fn add(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    Some(left? + right?)
}

pub fn multiply(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    Some(left? * right?)
}

/// Sum of all estimates; an empty input sums to zero
pub fn sum<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().try_fold(0.0, |acc, value| Some(acc + value?))
}

/// Product of all estimates; an empty input multiplies to one
pub fn product<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().try_fold(1.0, |acc, value| Some(acc * value?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Some(2.0), Some(3.0), Some(5.0), Some(6.0))]
    #[case(None, Some(3.0), None, None)]
    #[case(Some(2.0), None, None, None)]
    fn test_binary(
        #[case] left: Option<f64>,
        #[case] right: Option<f64>,
        #[case] added: Option<f64>,
        #[case] multiplied: Option<f64>,
    ) {
        assert_eq!(add(left, right), added);
        assert_eq!(multiply(left, right), multiplied);
    }

    #[test]
    fn test_folds() {
        assert_eq!(sum([Some(10.0), Some(20.0), Some(5.0)]), Some(35.0));
        assert_eq!(sum([Some(10.0), Some(20.0), None]), None);
        assert_eq!(sum(std::iter::empty()), Some(0.0));
        assert_eq!(product([Some(0.5), Some(0.5)]), Some(0.25));
        assert_eq!(product([None, Some(0.5)]), None);
        assert_eq!(product(std::iter::empty()), Some(1.0));
    }
}
