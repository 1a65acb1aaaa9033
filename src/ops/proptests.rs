//! Property-based tests for the operations library.

use proptest::prelude::*;

use super::*;

// Finite values small enough that products do not overflow
fn finite() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6f64
}

fn non_zero() -> impl Strategy<Value = f64> {
    prop_oneof![(-1.0e6f64..-1.0e-6f64), (1.0e-6f64..1.0e6f64)]
}

proptest! {
    #[test]
    fn arithmetic_matches_native_operators(x in finite(), y in finite()) {
        prop_assert_eq!(add(x, y).unwrap(), x + y);
        prop_assert_eq!(subtract(x, y).unwrap(), x - y);
        prop_assert_eq!(multiply(x, y).unwrap(), x * y);
    }

    #[test]
    fn divide_matches_native_operator(x in finite(), y in non_zero()) {
        prop_assert_eq!(divide(x, y).unwrap(), x / y);
    }

    #[test]
    fn divide_by_zero_always_fails(x in finite()) {
        prop_assert_eq!(divide(x, 0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn square_root_squares_back(x in 0.0f64..1.0e6) {
        let root = square_root(x).unwrap();
        prop_assert!((root * root - x).abs() <= 1e-9 * x.max(1.0));
    }

    #[test]
    fn square_root_rejects_negatives(x in -1.0e6f64..-1.0e-9) {
        prop_assert!(matches!(square_root(x), Err(CalcError::Domain(_))));
    }

    #[test]
    fn logarithms_reject_non_positive(x in -1.0e6f64..=0.0) {
        prop_assert!(matches!(log_natural(x), Err(CalcError::Domain(_))));
        prop_assert!(matches!(log_base10(x), Err(CalcError::Domain(_))));
    }

    #[test]
    fn tangent_is_undefined_at_odd_half_pi(k in -1000i32..1000) {
        let x = std::f64::consts::FRAC_PI_2 + f64::from(k) * std::f64::consts::PI;
        prop_assert!(matches!(tangent(x), Err(CalcError::Domain(_))));
    }

    #[test]
    fn text_operands_are_rejected(text in "[a-z]{1,8}", y in finite()) {
        let is_invalid =
            |result: Result<f64>| matches!(result, Err(CalcError::InvalidOperand { .. }));
        prop_assert!(is_invalid(add(text.as_str(), y)));
        prop_assert!(is_invalid(power(y, text.as_str())));
        prop_assert!(is_invalid(sine(text.as_str())));
    }
}
