//! Fixed table of supported arithmetic operations.

use crate::model::calculation::OperationError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the eight named arithmetic transforms a calculation can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Power,
    Root,
    Average,
    Mod,
}

/// Record string value for addition.
pub const OPERATION_ADDITION: &str = "Addition";
/// Record string value for subtraction.
pub const OPERATION_SUBTRACTION: &str = "Subtraction";
/// Record string value for multiplication.
pub const OPERATION_MULTIPLICATION: &str = "Multiplication";
/// Record string value for division.
pub const OPERATION_DIVISION: &str = "Division";
/// Record string value for exponentiation.
pub const OPERATION_POWER: &str = "Power";
/// Record string value for the n-th root.
pub const OPERATION_ROOT: &str = "Root";
/// Record string value for the two-operand mean.
pub const OPERATION_AVERAGE: &str = "Average";
/// Record string value for the remainder.
pub const OPERATION_MOD: &str = "Mod";

const SUPPORTED_OPERATION_STRINGS: &[&str] = &[
    OPERATION_ADDITION,
    OPERATION_SUBTRACTION,
    OPERATION_MULTIPLICATION,
    OPERATION_DIVISION,
    OPERATION_POWER,
    OPERATION_ROOT,
    OPERATION_AVERAGE,
    OPERATION_MOD,
];

impl Operation {
    /// All operations in table order.
    pub const ALL: [Operation; 8] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
        Self::Power,
        Self::Root,
        Self::Average,
        Self::Mod,
    ];

    /// Stable string id used in textual forms and portable records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addition => OPERATION_ADDITION,
            Self::Subtraction => OPERATION_SUBTRACTION,
            Self::Multiplication => OPERATION_MULTIPLICATION,
            Self::Division => OPERATION_DIVISION,
            Self::Power => OPERATION_POWER,
            Self::Root => OPERATION_ROOT,
            Self::Average => OPERATION_AVERAGE,
            Self::Mod => OPERATION_MOD,
        }
    }

    /// Looks up an operation by its exact record name.
    ///
    /// Matching is case-sensitive; `"addition"` is not a known operation.
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            OPERATION_ADDITION => Some(Self::Addition),
            OPERATION_SUBTRACTION => Some(Self::Subtraction),
            OPERATION_MULTIPLICATION => Some(Self::Multiplication),
            OPERATION_DIVISION => Some(Self::Division),
            OPERATION_POWER => Some(Self::Power),
            OPERATION_ROOT => Some(Self::Root),
            OPERATION_AVERAGE => Some(Self::Average),
            OPERATION_MOD => Some(Self::Mod),
            _ => None,
        }
    }
}

/// Returns supported operation names in table order.
pub fn supported_operation_strings() -> &'static [&'static str] {
    SUPPORTED_OPERATION_STRINGS
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::lookup(value).ok_or_else(|| OperationError::UnknownOperation(value.to_string()))
    }
}
