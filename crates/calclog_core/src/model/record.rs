//! Portable record form of a calculation.
//!
//! # Responsibility
//! - Encode a `Calculation` as a flat map of strings for persistence.
//! - Rebuild a `Calculation` from that map by re-running evaluation.
//!
//! # Invariants
//! - Decimal fields are written as exact decimal text, never as floats.
//! - The stored `result` is advisory: reconstruction always keeps the
//!   recomputed value and only warns on disagreement.

use crate::model::calculation::{parse_decimal, Calculation, OperationError, OperationResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat, string-keyed serialization of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub operation: String,
    pub operand1: String,
    pub operand2: String,
    pub result: String,
    /// ISO-8601 / RFC 3339 instant.
    pub timestamp: String,
}

impl CalculationRecord {
    /// Encodes the record as a JSON object.
    pub fn to_json(&self) -> OperationResult<String> {
        serde_json::to_string(self)
            .map_err(|err| OperationError::InvalidRecord(err.to_string()))
    }

    /// Decodes a record from a JSON object.
    ///
    /// # Errors
    /// - `InvalidRecord` when the input is not an object, a key is missing or
    ///   a value is not a string.
    pub fn from_json(input: &str) -> OperationResult<Self> {
        serde_json::from_str(input).map_err(|err| OperationError::InvalidRecord(err.to_string()))
    }
}

/// Disagreement between a persisted result and the recomputed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultMismatch {
    pub stored: Decimal,
    pub computed: Decimal,
}

impl Calculation {
    /// Converts this calculation into its portable record.
    pub fn to_portable(&self) -> CalculationRecord {
        CalculationRecord {
            operation: self.operation().as_str().to_string(),
            operand1: self.operand1().to_string(),
            operand2: self.operand2().to_string(),
            result: self.result().to_string(),
            timestamp: self
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    /// Rebuilds a calculation from a portable record.
    ///
    /// The stored timestamp replaces the reconstruction instant. A stored
    /// result that disagrees with the recomputed one is logged as a warning
    /// and discarded.
    ///
    /// # Errors
    /// - `InvalidRecord` for non-decimal operands/result or a non-ISO
    ///   timestamp.
    /// - Any construction error for the stored operation and operands.
    pub fn from_portable(record: &CalculationRecord) -> OperationResult<Self> {
        Self::reconstruct(record).map(|(calculation, _)| calculation)
    }

    /// Same as [`Calculation::from_portable`], also returning the detected
    /// result mismatch, if any.
    pub fn reconstruct(
        record: &CalculationRecord,
    ) -> OperationResult<(Self, Option<ResultMismatch>)> {
        let operand1 = parse_field("operand1", &record.operand1)?;
        let operand2 = parse_field("operand2", &record.operand2)?;
        let calculation = Self::new(record.operation.as_str(), operand1, operand2)?
            .with_restored_timestamp(parse_timestamp(&record.timestamp)?);

        let stored = parse_field("result", &record.result)?;
        let mismatch = (stored != calculation.result()).then(|| ResultMismatch {
            stored,
            computed: calculation.result(),
        });
        if let Some(mismatch) = mismatch {
            warn!(
                "event=record_result_mismatch module=model status=recomputed operation={} stored={} computed={}",
                calculation.operation(),
                mismatch.stored,
                mismatch.computed
            );
        }

        Ok((calculation, mismatch))
    }
}

fn parse_field(field: &str, value: &str) -> OperationResult<Decimal> {
    parse_decimal(value).map_err(|err| {
        OperationError::InvalidRecord(format!("{field} `{value}` is not a decimal: {err}"))
    })
}

fn parse_timestamp(value: &str) -> OperationResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = trimmed.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    trimmed
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            OperationError::InvalidRecord(format!("timestamp `{value}` is not ISO-8601"))
        })
}
