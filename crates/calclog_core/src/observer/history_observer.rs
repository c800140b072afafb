//! History observer contract and ordered notification registry.

use crate::model::calculation::Calculation;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ObserverResult<T> = Result<T, ObserverError>;

/// Observer contract violation or side-effect failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// Notification was delivered without a calculation.
    MissingCalculation,
    /// Collaborator failed to persist history.
    SaveFailed(String),
}

impl Display for ObserverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCalculation => {
                write!(f, "calculation must be present to notify observers")
            }
            Self::SaveFailed(message) => write!(f, "history auto-save failed: {message}"),
        }
    }
}

impl Error for ObserverError {}

/// Capability notified once per newly produced calculation.
///
/// Implementations inspect the calculation and never mutate it.
pub trait HistoryObserver {
    /// Stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Reacts to a present calculation.
    fn update(&self, calculation: &Calculation) -> ObserverResult<()>;

    /// Entry point for callers that may hold no calculation.
    ///
    /// # Errors
    /// - `MissingCalculation` when `calculation` is `None`.
    /// - Whatever [`HistoryObserver::update`] returns otherwise.
    fn notify(&self, calculation: Option<&Calculation>) -> ObserverResult<()> {
        let calculation = calculation.ok_or(ObserverError::MissingCalculation)?;
        self.update(calculation)
    }
}

/// Ordered collection of observers driven synchronously.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn HistoryObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one observer; notification follows registration order.
    pub fn register(&mut self, observer: Box<dyn HistoryObserver>) {
        debug!(
            "event=observer_registered module=observer status=ok observer={} position={}",
            observer.name(),
            self.observers.len()
        );
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Registered observer names in notification order.
    pub fn names(&self) -> Vec<&'static str> {
        self.observers.iter().map(|observer| observer.name()).collect()
    }

    /// Notifies every observer in order, stopping at the first failure.
    ///
    /// Observers that already ran are not rolled back.
    pub fn notify_all(&self, calculation: &Calculation) -> ObserverResult<()> {
        for observer in &self.observers {
            if let Err(err) = observer.update(calculation) {
                error!(
                    "event=observer_failed module=observer status=error observer={} error={}",
                    observer.name(),
                    err
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.names())
            .finish()
    }
}
