//! Conditional history persistence observer.
//!
//! # Responsibility
//! - Trigger the session's "persist now" operation after each calculation
//!   when the session's auto-save flag is on.
//!
//! # Invariants
//! - Nothing is persisted while `auto_save_enabled()` is `false`.
//! - The calculation itself is never read beyond presence.

use crate::model::calculation::Calculation;
use crate::observer::history_observer::{HistoryObserver, ObserverError, ObserverResult};
use log::info;
use std::error::Error;
use std::rc::Rc;
use std::sync::Arc;

/// Error type returned by a collaborator's save operation.
pub type SaveError = Box<dyn Error + Send + Sync + 'static>;

/// Narrow surface a session must expose to be auto-saved.
pub trait AutoSaveTarget {
    /// Current value of the session's auto-save configuration flag.
    fn auto_save_enabled(&self) -> bool;

    /// Persists the session history immediately.
    fn save_history(&self) -> Result<(), SaveError>;
}

impl<T: AutoSaveTarget + ?Sized> AutoSaveTarget for &T {
    fn auto_save_enabled(&self) -> bool {
        (**self).auto_save_enabled()
    }

    fn save_history(&self) -> Result<(), SaveError> {
        (**self).save_history()
    }
}

impl<T: AutoSaveTarget + ?Sized> AutoSaveTarget for Rc<T> {
    fn auto_save_enabled(&self) -> bool {
        (**self).auto_save_enabled()
    }

    fn save_history(&self) -> Result<(), SaveError> {
        (**self).save_history()
    }
}

impl<T: AutoSaveTarget + ?Sized> AutoSaveTarget for Arc<T> {
    fn auto_save_enabled(&self) -> bool {
        (**self).auto_save_enabled()
    }

    fn save_history(&self) -> Result<(), SaveError> {
        (**self).save_history()
    }
}

/// Saves the bound session's history after each calculation when enabled.
#[derive(Debug, Clone)]
pub struct AutoSaveObserver<T: AutoSaveTarget> {
    target: T,
}

impl<T: AutoSaveTarget> AutoSaveObserver<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: AutoSaveTarget> HistoryObserver for AutoSaveObserver<T> {
    fn name(&self) -> &'static str {
        "auto_save"
    }

    fn update(&self, _calculation: &Calculation) -> ObserverResult<()> {
        if !self.target.auto_save_enabled() {
            return Ok(());
        }

        self.target
            .save_history()
            .map_err(|err| ObserverError::SaveFailed(err.to_string()))?;
        info!("event=history_auto_saved module=observer status=ok");
        Ok(())
    }
}
