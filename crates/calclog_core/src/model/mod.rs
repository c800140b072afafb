//! Calculation domain model.
//!
//! # Responsibility
//! - Define the immutable `Calculation` entity and its operation table.
//! - Own the portable record used for persistence round-trips.
//!
//! # Invariants
//! - A `Calculation` is only observable fully evaluated.
//! - Arithmetic performed here is the source of truth over persisted results.

pub mod calculation;
pub mod operation;
pub mod record;
