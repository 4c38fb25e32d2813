//! Domain model for category assignment sessions.
//!
//! # Responsibility
//! - Define items, categories and the bucket/partition containers.
//! - Keep animation state (`just_moved`) on the applied side only.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - A partition always has one bucket per category plus uncategorized.

pub mod category;
pub mod item;
pub mod partition;
