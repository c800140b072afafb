//! Calculation observers.
//!
//! # Responsibility
//! - Decouple calculation producers from side-effecting consumers.
//! - Deliver notifications synchronously, in registration order.
//!
//! # Invariants
//! - Observers never mutate the calculation they receive.
//! - A failing observer does not undo observers that already ran.

pub mod auto_save;
pub mod history_observer;
pub mod logging_observer;
