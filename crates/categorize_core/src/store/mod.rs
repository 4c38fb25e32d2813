//! Assignment store: dual-partition state and reconciliation.
//!
//! # Responsibility
//! - Keep the presentation layer decoupled from partition bookkeeping.
//! - Report caller desynchronization as typed errors instead of panics.

pub mod assignment_store;
pub mod distribution;
pub mod error;
pub mod reconcile;
