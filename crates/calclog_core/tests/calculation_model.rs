use calclog_core::{Calculation, Operation, OperationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

fn calc(operation: &str, a: Decimal, b: Decimal) -> Calculation {
    Calculation::new(operation, a, b).expect("calculation should succeed")
}

#[test]
fn addition_computes_and_renders_textual_form() {
    let calculation = calc("Addition", dec!(2), dec!(3));

    assert_eq!(calculation.operation(), Operation::Addition);
    assert_eq!(calculation.result(), dec!(5));
    assert_eq!(calculation.to_string(), "Addition(2, 3) = 5");
}

#[test]
fn exact_operations_match_direct_arithmetic() {
    let cases = [
        ("Addition", dec!(1.5), dec!(2.25), dec!(3.75)),
        ("Subtraction", dec!(10), dec!(4.5), dec!(5.5)),
        ("Multiplication", dec!(-3), dec!(2.5), dec!(-7.5)),
        ("Division", dec!(10), dec!(4), dec!(2.5)),
        ("Average", dec!(2), dec!(3), dec!(2.5)),
        ("Mod", dec!(10), dec!(3), dec!(1)),
        ("Mod", dec!(-7), dec!(3), dec!(-1)),
    ];

    for (operation, a, b, expected) in cases {
        assert_eq!(
            calc(operation, a, b).result(),
            expected,
            "{operation}({a}, {b})"
        );
    }
}

#[test]
fn power_and_root_go_through_float_conversion() {
    assert_eq!(calc("Power", dec!(2), dec!(3)).result(), dec!(8));
    assert_eq!(calc("Power", dec!(5), dec!(0)).result(), dec!(1));
    assert_eq!(calc("Root", dec!(9), dec!(2)).result(), dec!(3));

    let cube_root = calc("Root", dec!(27), dec!(3)).result();
    assert!((cube_root - dec!(3)).abs() < dec!(0.000000001), "got {cube_root}");
}

#[test]
fn float_results_keep_every_digit_the_float_holds() {
    let root = calc("Root", dec!(2), dec!(2));
    assert_eq!(
        root.result(),
        Decimal::from_str("1.4142135623730951454746218587").unwrap()
    );
    assert_eq!(root.to_string(), "Root(2, 2) = 1.4142135623730951454746218587");

    // 1.1 ** 0.5 as f64 is 1.0488088481701516..., not the 15-digit 1.048808848170152.
    let power = calc("Power", dec!(1.1), dec!(0.5)).result();
    assert_ne!(power, dec!(1.048808848170152));
    assert!((power - dec!(1.0488088481701516)).abs() < dec!(0.0000000000000001), "got {power}");
}

#[test]
fn tiny_float_results_underflow_to_zero() {
    assert!(calc("Power", dec!(0.5), dec!(100)).result().is_zero());
}

#[test]
fn division_by_zero_always_fails() {
    for operand1 in [dec!(0), dec!(10), dec!(-3.5)] {
        let err = Calculation::new("Division", operand1, dec!(0)).expect_err("must fail");
        assert_eq!(err, OperationError::DivisionByZero);
        assert!(err.to_string().to_lowercase().contains("division by zero"));
    }
}

#[test]
fn modulo_by_zero_always_fails() {
    let err = Calculation::new("Mod", dec!(7), dec!(0)).expect_err("must fail");
    assert_eq!(err, OperationError::DivisionByZero);
}

#[test]
fn negative_exponent_is_rejected() {
    let err = Calculation::new("Power", dec!(2), dec!(-1)).expect_err("must fail");
    assert_eq!(err, OperationError::NegativeExponent);
    assert_eq!(err.to_string(), "Negative exponents are not supported");
}

#[test]
fn invalid_root_inputs_are_rejected() {
    let err = Calculation::new("Root", dec!(-8), dec!(3)).expect_err("negative radicand");
    assert_eq!(err, OperationError::InvalidRoot);

    let err = Calculation::new("Root", dec!(8), dec!(0)).expect_err("zero degree");
    assert_eq!(err, OperationError::InvalidRoot);
}

#[test]
fn unknown_operation_fails_before_evaluation() {
    // Operands that would fail every numeric check still yield the lookup error.
    let err = Calculation::new("Divide", dec!(1), dec!(0)).expect_err("unknown op");
    assert_eq!(err, OperationError::UnknownOperation("Divide".to_string()));
    assert_eq!(err.to_string(), "Unknown operation: Divide");
}

#[test]
fn power_of_negative_base_with_fractional_exponent_fails() {
    let err = Calculation::new("Power", dec!(-8), dec!(0.5)).expect_err("NaN result");
    assert!(matches!(err, OperationError::Arithmetic(_)));
}

#[test]
fn equality_ignores_timestamp() {
    let first = calc("Multiplication", dec!(6), dec!(7));
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = calc("Multiplication", dec!(6), dec!(7));

    assert_ne!(first.timestamp(), second.timestamp());
    assert_eq!(first, second);
    assert_ne!(first, calc("Multiplication", dec!(7), dec!(6)));
    assert_ne!(first, calc("Addition", dec!(6), dec!(7)));
}

#[test]
fn compute_accepts_parsed_operation() {
    let calculation =
        Calculation::compute(Operation::Subtraction, dec!(1), dec!(3)).expect("compute");
    assert_eq!(calculation.to_string(), "Subtraction(1, 3) = -2");
}

#[test]
fn format_result_rounds_and_strips_trailing_zeros() {
    let third = calc("Division", dec!(1), dec!(3));
    assert_eq!(third.formatted_result(), "0.3333333333");
    assert_eq!(third.format_result(2), "0.33");

    let two_thirds = calc("Division", dec!(2), dec!(3));
    assert_eq!(two_thirds.format_result(4), "0.6667");

    assert_eq!(calc("Average", dec!(1), dec!(2)).formatted_result(), "1.5");
    assert_eq!(calc("Multiplication", dec!(2.50), dec!(2)).formatted_result(), "5");
}

#[test]
fn format_result_falls_back_when_precision_is_not_representable() {
    let big = Decimal::from_str("12345678901234567890").expect("decimal");
    let calculation = calc("Addition", big, dec!(0.5));

    // 20 integer digits + 10 fractional digits exceed the significant-digit cap.
    assert_eq!(calculation.formatted_result(), calculation.result().to_string());
    assert_eq!(calculation.format_result(8), "12345678901234567890.5");
    assert_eq!(calc("Addition", dec!(1), dec!(1)).format_result(40), "2");
}

#[test]
fn describe_lists_every_field() {
    let calculation = calc("Average", dec!(4), dec!(8));
    let detailed = calculation.describe();

    assert!(detailed.starts_with("Calculation(operation='Average', operand1=4, operand2=8, result=6"));
    assert!(detailed.contains("timestamp='"));

    let debug = format!("{calculation:?}");
    for field in ["operation", "operand1", "operand2", "result", "timestamp"] {
        assert!(debug.contains(field), "missing {field} in {debug}");
    }
}
