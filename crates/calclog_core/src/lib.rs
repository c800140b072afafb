//! Core domain logic for calclog.
//! Owns the calculation entity and the observers notified about it.

pub mod logging;
pub mod model;
pub mod observer;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::calculation::{
    parse_decimal, Calculation, OperationError, OperationResult, DEFAULT_RESULT_PRECISION,
    MAX_SIGNIFICANT_DIGITS,
};
pub use model::operation::{supported_operation_strings, Operation};
pub use model::record::{CalculationRecord, ResultMismatch};
pub use observer::auto_save::{AutoSaveObserver, AutoSaveTarget, SaveError};
pub use observer::history_observer::{
    HistoryObserver, ObserverError, ObserverRegistry, ObserverResult,
};
pub use observer::logging_observer::LoggingObserver;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
