//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run one calculation end to end: evaluate, notify observers, print the
//!   textual form and portable record.
//! - Keep output deterministic apart from the record timestamp.

use calclog_core::{
    default_log_level, init_logging, parse_decimal, Calculation, LoggingConfig, LoggingObserver,
    ObserverRegistry,
};
use rust_decimal::Decimal;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "CALCLOG_LOG_DIR";
const LOG_LEVEL_ENV: &str = "CALCLOG_LOG_LEVEL";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [operation, operand1, operand2] = args.as_slice() else {
        eprintln!(
            "usage: calclog_cli <Operation> <operand1> <operand2>\noperations: {}",
            calclog_core::supported_operation_strings().join(", ")
        );
        return ExitCode::from(2);
    };

    println!("calclog_core version={}", calclog_core::core_version());

    if let Err(err) = start_logging() {
        eprintln!("logging disabled: {err}");
    }

    match run(operation, operand1, operand2) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_failed module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
    }
}

fn start_logging() -> Result<(), String> {
    let Ok(log_dir) = std::env::var(LOG_DIR_ENV) else {
        return Ok(());
    };
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&LoggingConfig::new(level, log_dir))
}

fn run(operation: &str, operand1: &str, operand2: &str) -> Result<(), String> {
    let operand1 = parse_operand(operand1)?;
    let operand2 = parse_operand(operand2)?;
    let calculation = Calculation::new(operation, operand1, operand2).map_err(|err| err.to_string())?;

    let mut observers = ObserverRegistry::new();
    observers.register(Box::new(LoggingObserver::new()));
    observers
        .notify_all(&calculation)
        .map_err(|err| err.to_string())?;

    let record = calculation
        .to_portable()
        .to_json()
        .map_err(|err| err.to_string())?;

    println!("{calculation}");
    println!("formatted={}", calculation.formatted_result());
    println!("record={record}");
    Ok(())
}

// Same notation rules as portable records.
fn parse_operand(value: &str) -> Result<Decimal, String> {
    parse_decimal(value).map_err(|err| format!("`{value}` is not a decimal: {err}"))
}
