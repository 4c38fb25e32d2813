//! Core assignment engine for sorting text items into categories.
//! This crate is the single source of truth for assignment invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{
    ContentParams, DistributionStrategy, StoreConfig, TextGroup, DEFAULT_UNCATEGORIZED_LABEL,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryValidationError};
pub use model::item::{AppliedItem, ItemId, ItemValidationError, TextItem};
pub use model::partition::{
    AppliedPartition, Bucket, BucketId, Partition, PartitionEntry, WorkingPartition,
};
pub use store::assignment_store::{AssignmentSnapshot, AssignmentStore, BucketSummary};
pub use store::distribution::InitialDistribution;
pub use store::error::{AssignmentError, AssignmentResult, ConfigurationError, InvariantError};
pub use store::reconcile::ReconcileSummary;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
