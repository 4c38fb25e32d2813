//! Assignment store error taxonomy.
//!
//! # Invariants
//! - `InvariantError` means caller and store disagree about membership. The
//!   failing lookup always happens before mutation, so state is untouched,
//!   but the session should be reinitialized.
//! - `ConfigurationError` is only produced by initialization; no store is
//!   created when it is returned.

use crate::model::category::CategoryValidationError;
use crate::model::item::{ItemId, ItemValidationError};
use crate::model::partition::BucketId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by assignment store operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Caller/store desynchronization. Not user-recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Item id is not present in the working partition.
    ItemNotFound(ItemId),
    /// Target bucket is outside `[0, bucket_count)`.
    BucketOutOfRange {
        bucket: BucketId,
        bucket_count: usize,
    },
    /// Toggle was aimed at the uncategorized bucket itself.
    CannotToggleUncategorized(BucketId),
    /// Item appears in more than one bucket of one partition.
    DuplicatePlacement(ItemId),
    /// Item exists in only one of the two partitions.
    UniverseMismatch(ItemId),
}

impl Display for InvariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "item not found in working partition: {id}"),
            Self::BucketOutOfRange {
                bucket,
                bucket_count,
            } => write!(
                f,
                "bucket {bucket} is out of range; partition has {bucket_count} buckets"
            ),
            Self::CannotToggleUncategorized(bucket) => {
                write!(f, "cannot toggle items on uncategorized bucket {bucket}")
            }
            Self::DuplicatePlacement(id) => write!(f, "item placed more than once: {id}"),
            Self::UniverseMismatch(id) => {
                write!(f, "item present in only one partition: {id}")
            }
        }
    }
}

impl Error for InvariantError {}

/// Rejected session setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two input items share one id.
    DuplicateItemId(ItemId),
    /// Initial distribution targets a bucket outside `[0, bucket_count)`.
    BucketOutOfRange {
        item: ItemId,
        bucket: BucketId,
        bucket_count: usize,
    },
    /// Initial distribution names an item that is not in the item list.
    UnknownItem(ItemId),
    /// Category at `index` has an invalid name.
    InvalidCategoryName {
        index: usize,
        source: CategoryValidationError,
    },
    /// Input item failed validation.
    InvalidItem(ItemValidationError),
    /// Uncategorized label is blank after trim.
    InvalidUncategorizedLabel,
    /// Config or content payload could not be parsed.
    InvalidConfig(String),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateItemId(id) => write!(f, "duplicate item id: {id}"),
            Self::BucketOutOfRange {
                item,
                bucket,
                bucket_count,
            } => write!(
                f,
                "item {item} assigned to bucket {bucket}; partition has {bucket_count} buckets"
            ),
            Self::UnknownItem(id) => write!(f, "initial distribution names unknown item: {id}"),
            Self::InvalidCategoryName { index, source } => {
                write!(f, "category {index}: {source}")
            }
            Self::InvalidItem(err) => write!(f, "invalid item: {err}"),
            Self::InvalidUncategorizedLabel => {
                write!(f, "uncategorized label must not be blank")
            }
            Self::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCategoryName { source, .. } => Some(source),
            Self::InvalidItem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for ConfigurationError {
    fn from(value: ItemValidationError) -> Self {
        Self::InvalidItem(value)
    }
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidConfig(value.to_string())
    }
}

/// Errors from assignment store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    Invariant(InvariantError),
    Configuration(ConfigurationError),
}

impl AssignmentError {
    /// Whether the session must be discarded and reinitialized.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

impl Display for AssignmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invariant(err) => write!(f, "{err}"),
            Self::Configuration(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AssignmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invariant(err) => Some(err),
            Self::Configuration(err) => Some(err),
        }
    }
}

impl From<InvariantError> for AssignmentError {
    fn from(value: InvariantError) -> Self {
        Self::Invariant(value)
    }
}

impl From<ConfigurationError> for AssignmentError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}
