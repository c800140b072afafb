//! Calculation domain model.
//!
//! # Responsibility
//! - Evaluate one arithmetic operation eagerly at construction.
//! - Provide textual and precision-bounded renderings of the result.
//!
//! # Invariants
//! - `result` always equals `operation` applied to `(operand1, operand2)`.
//! - Operation and operands never change after construction.
//! - Only the reconstruction path may overwrite `timestamp`.
//! - Equality ignores `timestamp`.
//!
//! # Known limitations
//! - `Power` and `Root` go through `f64`, so their results carry binary
//!   floating-point rounding error.
//! - The `f64` result is converted through its exact decimal expansion, then
//!   rounded to the decimal type's 28-digit scale. Nothing beyond the float's
//!   own error is lost, and records written from an exact float-to-decimal
//!   conversion reload without a result mismatch.
//! - Float results smaller in magnitude than `1e-28` underflow to `0`
//!   (e.g. `Power(0.5, 100)`); the stored result is not exact for them.

use crate::model::operation::Operation;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fractional digits used by [`Calculation::formatted_result`].
pub const DEFAULT_RESULT_PRECISION: u32 = 10;

/// Significant digits a rounded result may occupy before formatting falls
/// back to the unrounded text.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 28;

// Fractional digits written when expanding an `f64`. Exact for every
// magnitude of at least 2^-11, well past the decimal type's scale.
const FLOAT_EXPANSION_DIGITS: usize = 64;

pub type OperationResult<T> = Result<T, OperationError>;

/// Failure raised while evaluating or reconstructing a calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Operation name is not in the supported table.
    UnknownOperation(String),
    /// Division or modulo with a zero divisor.
    DivisionByZero,
    /// Power with an exponent below zero.
    NegativeExponent,
    /// Root of a negative radicand or with a zero degree.
    InvalidRoot,
    /// Numeric type could not produce a value (overflow, non-finite float).
    Arithmetic(String),
    /// Portable record is incomplete or malformed.
    InvalidRecord(String),
}

impl Display for OperationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "Unknown operation: {name}"),
            Self::DivisionByZero => write!(f, "Division by zero is not allowed"),
            Self::NegativeExponent => write!(f, "Negative exponents are not supported"),
            Self::InvalidRoot => write!(f, "Invalid root operation"),
            Self::Arithmetic(message) => write!(f, "Calculation failed: {message}"),
            Self::InvalidRecord(message) => write!(f, "Invalid calculation data: {message}"),
        }
    }
}

impl Error for OperationError {}

/// One completed arithmetic operation.
///
/// Built only through [`Calculation::new`] / [`Calculation::compute`] (or
/// reconstruction from a portable record), so a value of this type is never
/// observed half-evaluated.
#[derive(Debug, Clone)]
pub struct Calculation {
    operation: Operation,
    operand1: Decimal,
    operand2: Decimal,
    result: Decimal,
    timestamp: DateTime<Utc>,
}

impl Calculation {
    /// Looks up `operation` by name and evaluates it.
    ///
    /// # Errors
    /// - `UnknownOperation` when the name is not in the table; no numeric
    ///   work is attempted in that case.
    /// - Any evaluation error from [`Calculation::compute`].
    pub fn new(operation: &str, operand1: Decimal, operand2: Decimal) -> OperationResult<Self> {
        let operation: Operation = operation.parse()?;
        Self::compute(operation, operand1, operand2)
    }

    /// Evaluates an already-parsed operation and stamps the current time.
    pub fn compute(
        operation: Operation,
        operand1: Decimal,
        operand2: Decimal,
    ) -> OperationResult<Self> {
        let result = apply(operation, operand1, operand2)?;
        Ok(Self {
            operation,
            operand1,
            operand2,
            result,
            timestamp: Utc::now(),
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operand1(&self) -> Decimal {
        self.operand1
    }

    pub fn operand2(&self) -> Decimal {
        self.operand2
    }

    pub fn result(&self) -> Decimal {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Replaces the construction instant with a persisted one.
    pub(crate) fn with_restored_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Renders `result` rounded half-to-even to `precision` fractional
    /// digits, with trailing zeros stripped.
    ///
    /// Falls back to the unrounded text when the rounded value would need
    /// more than [`MAX_SIGNIFICANT_DIGITS`] digits.
    pub fn format_result(&self, precision: u32) -> String {
        let normalized = self.result.normalize();
        if precision > MAX_SIGNIFICANT_DIGITS
            || integer_digits(normalized) + precision > MAX_SIGNIFICANT_DIGITS
        {
            return self.result.to_string();
        }

        normalized
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven)
            .normalize()
            .to_string()
    }

    /// [`Calculation::format_result`] with [`DEFAULT_RESULT_PRECISION`].
    pub fn formatted_result(&self) -> String {
        self.format_result(DEFAULT_RESULT_PRECISION)
    }

    /// Field-by-field rendering for diagnostics.
    pub fn describe(&self) -> String {
        format!(
            "Calculation(operation='{}', operand1={}, operand2={}, result={}, timestamp='{}')",
            self.operation,
            self.operand1,
            self.operand2,
            self.result,
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

impl Display for Calculation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation, self.operand1, self.operand2, self.result
        )
    }
}

impl PartialEq for Calculation {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation
            && self.operand1 == other.operand1
            && self.operand2 == other.operand2
            && self.result == other.result
    }
}

impl Eq for Calculation {}

fn apply(operation: Operation, x: Decimal, y: Decimal) -> OperationResult<Decimal> {
    match operation {
        Operation::Addition => x.checked_add(y).ok_or_else(|| overflow(operation)),
        Operation::Subtraction => x.checked_sub(y).ok_or_else(|| overflow(operation)),
        Operation::Multiplication => x.checked_mul(y).ok_or_else(|| overflow(operation)),
        Operation::Division => {
            if y.is_zero() {
                return Err(OperationError::DivisionByZero);
            }
            x.checked_div(y).ok_or_else(|| overflow(operation))
        }
        Operation::Power => {
            if y < Decimal::ZERO {
                return Err(OperationError::NegativeExponent);
            }
            float_to_decimal(to_float(x)?.powf(to_float(y)?))
        }
        Operation::Root => {
            if x < Decimal::ZERO || y.is_zero() {
                return Err(OperationError::InvalidRoot);
            }
            float_to_decimal(to_float(x)?.powf(1.0 / to_float(y)?))
        }
        Operation::Average => x
            .checked_add(y)
            .and_then(|sum| sum.checked_div(Decimal::from(2)))
            .ok_or_else(|| overflow(operation)),
        Operation::Mod => {
            if y.is_zero() {
                return Err(OperationError::DivisionByZero);
            }
            x.checked_rem(y).ok_or_else(|| overflow(operation))
        }
    }
}

fn overflow(operation: Operation) -> OperationError {
    OperationError::Arithmetic(format!("{operation} overflowed the decimal range"))
}

fn to_float(value: Decimal) -> OperationResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| OperationError::Arithmetic(format!("{value} has no float representation")))
}

fn float_to_decimal(value: f64) -> OperationResult<Decimal> {
    if !value.is_finite() {
        return Err(OperationError::Arithmetic(format!(
            "result {value} is not a finite number"
        )));
    }
    let expanded = format!("{value:.precision$}", precision = FLOAT_EXPANSION_DIGITS);
    parse_decimal(&expanded)
        .map(|decimal| decimal.normalize())
        .map_err(|_| {
            OperationError::Arithmetic(format!("result {value} is outside the decimal range"))
        })
}

/// Parses decimal text in plain (`2.50`) or scientific (`1e2`) notation.
///
/// Surrounding whitespace is ignored. Digits beyond the decimal type's
/// scale are rounded away.
pub fn parse_decimal(value: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
}

fn integer_digits(value: Decimal) -> u32 {
    let whole = value.trunc().abs();
    if whole.is_zero() {
        0
    } else {
        whole.to_string().len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, float_to_decimal, integer_digits, parse_decimal, OperationError};
    use crate::model::operation::Operation;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).expect("decimal literal")
    }

    #[test]
    fn integer_digits_ignores_sign_and_fraction() {
        assert_eq!(integer_digits(d("0.25")), 0);
        assert_eq!(integer_digits(d("-7.5")), 1);
        assert_eq!(integer_digits(d("12345.000")), 5);
    }

    #[test]
    fn overflow_is_reported_as_arithmetic_failure() {
        let err = apply(Operation::Multiplication, Decimal::MAX, d("2"))
            .expect_err("overflow must fail");
        assert!(matches!(err, OperationError::Arithmetic(_)));
        assert!(err.to_string().starts_with("Calculation failed:"));
    }

    #[test]
    fn non_finite_float_result_is_rejected() {
        let err = apply(Operation::Root, d("0"), d("-2")).expect_err("0^(-1/2) is infinite");
        assert!(matches!(err, OperationError::Arithmetic(_)));
    }

    #[test]
    fn float_conversion_keeps_the_full_expansion() {
        assert_eq!(
            float_to_decimal(2f64.sqrt()).unwrap(),
            d("1.4142135623730951454746218587")
        );
        assert_eq!(float_to_decimal(8.0).unwrap().to_string(), "8");
        assert_eq!(float_to_decimal(2.25).unwrap().to_string(), "2.25");
    }

    #[test]
    fn float_conversion_underflows_to_zero() {
        assert!(float_to_decimal(0.5f64.powi(100)).unwrap().is_zero());
    }

    #[test]
    fn float_conversion_rejects_values_beyond_decimal_range() {
        let err = float_to_decimal(1e30).expect_err("1e30 exceeds the decimal range");
        assert!(matches!(err, OperationError::Arithmetic(_)));
    }

    #[test]
    fn parse_decimal_accepts_plain_and_scientific_text() {
        assert_eq!(parse_decimal(" 2.50 ").unwrap(), Decimal::new(25, 1));
        assert_eq!(parse_decimal("1e2").unwrap(), Decimal::from(100));
        assert!(parse_decimal("abc").is_err());
    }
}
