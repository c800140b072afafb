//! Observer that writes each calculation to the log facade.

use crate::model::calculation::Calculation;
use crate::observer::history_observer::{HistoryObserver, ObserverResult};
use log::info;

/// Emits one informational line per calculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl HistoryObserver for LoggingObserver {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn update(&self, calculation: &Calculation) -> ObserverResult<()> {
        info!(
            "event=calculation_performed module=observer status=ok operation={} operand1={} operand2={} result={}",
            calculation.operation(),
            calculation.operand1(),
            calculation.operand2(),
            calculation.result()
        );
        Ok(())
    }
}
