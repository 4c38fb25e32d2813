//! Working-to-applied reconciliation.
//!
//! Folds working membership into the applied partition in two passes:
//!
//! 1. Walk each applied bucket back to front. Entries missing from the
//!    same-indexed working bucket are removed; entries still present get
//!    `just_moved = false`.
//! 2. Walk each working bucket front to back. Entries missing from the
//!    same-indexed applied bucket are appended with `just_moved = true`.
//!
//! Items that stayed keep their applied position, so the presentation layer
//! only re-mounts and animates what actually changed bucket.
//!
//! # Invariants
//! - Both partitions have the same bucket count.
//! - After the call, applied membership equals working membership bucket by
//!   bucket. Working is never touched.
//! - A second call with no intervening move flags nothing.

use crate::model::item::{AppliedItem, ItemId};
use crate::model::partition::{AppliedPartition, PartitionEntry, WorkingPartition};

/// What one reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Items appended to a new bucket, in working order.
    pub moved: Vec<ItemId>,
    /// Items removed from their old applied bucket.
    pub removed: usize,
    /// Items that stayed put.
    pub settled: usize,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        self.moved.is_empty() && self.removed == 0
    }
}

pub(crate) fn reconcile(
    applied: &mut AppliedPartition,
    working: &WorkingPartition,
) -> ReconcileSummary {
    debug_assert_eq!(applied.bucket_count(), working.bucket_count());
    let mut summary = ReconcileSummary::default();

    for (bucket_id, bucket) in applied.buckets_mut().iter_mut().enumerate() {
        // Reverse scan keeps pending indices valid across removals.
        for index in (0..bucket.len()).rev() {
            let item_id = bucket.as_slice()[index].item_id();
            if working.contains(bucket_id, item_id) {
                if let Some(entry) = bucket.get_mut(index) {
                    entry.just_moved = false;
                }
                summary.settled += 1;
            } else {
                bucket.remove_at(index);
                summary.removed += 1;
            }
        }
    }

    for (bucket_id, source) in working.buckets().iter().enumerate() {
        let Some(target) = applied.bucket_mut(bucket_id) else {
            continue;
        };
        for item in source {
            if !target.contains(item.id) {
                target.push(AppliedItem::arrived(item.clone()));
                summary.moved.push(item.id);
            }
        }
    }

    summary
}

/// Clears every `just_moved` flag. Membership is untouched.
pub(crate) fn clear_flags(applied: &mut AppliedPartition) -> usize {
    let mut cleared = 0;
    for bucket in applied.buckets_mut() {
        for entry in bucket.iter_mut() {
            if entry.just_moved {
                entry.just_moved = false;
                cleared += 1;
            }
        }
    }
    cleared
}
