//! Session-scoped assignment store.
//!
//! # Responsibility
//! - Own the applied and working partitions of one sorting session.
//! - Expose move/toggle on working, reconciliation into applied, and the
//!   animation-free commit used on layout changes.
//!
//! # Invariants
//! - Exclusivity holds for both partitions after every operation.
//! - Applied and working always hold the same set of item ids.
//! - Failing operations return before mutating anything.
//! - All access is single-writer (`&mut self`); callers serialize events.

use crate::config::{ContentParams, StoreConfig, DEFAULT_UNCATEGORIZED_LABEL};
use crate::model::category::{normalize_label, Category};
use crate::model::item::{AppliedItem, ItemId, ItemValidationError, TextItem};
use crate::model::partition::{AppliedPartition, BucketId, WorkingPartition};
use crate::store::distribution::{distribute, InitialDistribution};
use crate::store::error::{AssignmentResult, ConfigurationError, InvariantError};
use crate::store::reconcile::{clear_flags, reconcile, ReconcileSummary};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;

/// Display summary of one applied bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub bucket_id: BucketId,
    /// Category name, or the uncategorized label.
    pub label: String,
    /// Applied item count.
    pub count: usize,
    pub is_uncategorized: bool,
}

impl BucketSummary {
    /// Header text shown above a bucket, e.g. `Fruit (3)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Serialize)]
pub struct AssignmentSnapshot<'a> {
    pub categories: &'a [Category],
    pub uncategorized_label: &'a str,
    pub applied: &'a AppliedPartition,
}

/// Dual-partition store for one session.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    categories: Vec<Category>,
    uncategorized_label: String,
    applied: AppliedPartition,
    working: WorkingPartition,
    last_summary: ReconcileSummary,
}

impl AssignmentStore {
    /// Creates a session with applied = working = the initial distribution.
    ///
    /// # Errors
    /// - `ConfigurationError` for nil or duplicate item ids and for explicit
    ///   distributions that name unknown items or out-of-range buckets.
    pub fn initialize(
        categories: Vec<Category>,
        items: Vec<TextItem>,
        distribution: &InitialDistribution,
    ) -> AssignmentResult<Self> {
        if items.iter().any(|item| item.id.is_nil()) {
            return Err(ConfigurationError::InvalidItem(ItemValidationError::NilId).into());
        }

        let working = distribute(categories.len(), items, distribution).map_err(|err| {
            warn!("event=store_init module=store status=error reason={err}");
            err
        })?;
        let applied = settled_copy(&working);

        info!(
            "event=store_init module=store status=ok categories={} items={}",
            categories.len(),
            working.item_count()
        );

        Ok(Self {
            categories,
            uncategorized_label: DEFAULT_UNCATEGORIZED_LABEL.to_string(),
            applied,
            working,
            last_summary: ReconcileSummary::default(),
        })
    }

    /// Creates a session using the strategy and label from `config`.
    pub fn from_config(
        categories: Vec<Category>,
        items: Vec<TextItem>,
        config: &StoreConfig,
    ) -> AssignmentResult<Self> {
        config.validate()?;
        let label = normalize_label(config.uncategorized_label.clone())
            .ok_or(ConfigurationError::InvalidUncategorizedLabel)?;
        let mut store = Self::initialize(categories, items, &InitialDistribution::from(config))?;
        store.uncategorized_label = label;
        Ok(store)
    }

    /// Creates a session from host content parameters.
    pub fn from_content(params: ContentParams, config: &StoreConfig) -> AssignmentResult<Self> {
        let (categories, items) = params.into_session_parts()?;
        Self::from_config(categories, items, config)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn uncategorized_label(&self) -> &str {
        &self.uncategorized_label
    }

    /// Id of the reserved uncategorized bucket (`categories().len()`).
    pub fn uncategorized_id(&self) -> BucketId {
        self.working.uncategorized_id()
    }

    pub fn bucket_count(&self) -> usize {
        self.working.bucket_count()
    }

    /// Last committed partition, with move flags.
    pub fn applied(&self) -> &AppliedPartition {
        &self.applied
    }

    /// Partition being edited.
    pub fn working(&self) -> &WorkingPartition {
        &self.working
    }

    /// Summary of the most recent reconciliation.
    pub fn last_summary(&self) -> &ReconcileSummary {
        &self.last_summary
    }

    /// Moves one item to the end of `target` in the working partition.
    ///
    /// Moving to the bucket that already holds the item re-appends it to the
    /// end of that bucket.
    ///
    /// # Errors
    /// - `InvariantError::BucketOutOfRange` when `target` is not a bucket.
    /// - `InvariantError::ItemNotFound` when `item_id` is unknown.
    pub fn move_item(&mut self, item_id: ItemId, target: BucketId) -> AssignmentResult<()> {
        self.ensure_bucket(target)?;
        let source = self.locate_working(item_id)?;

        let Some(index) = self
            .working
            .bucket(source)
            .and_then(|bucket| bucket.position(item_id))
        else {
            return Err(InvariantError::ItemNotFound(item_id).into());
        };
        let Some(source_bucket) = self.working.bucket_mut(source) else {
            return Err(InvariantError::ItemNotFound(item_id).into());
        };
        let item = source_bucket.remove_at(index);
        if let Some(target_bucket) = self.working.bucket_mut(target) {
            target_bucket.push(item);
        }

        debug!(
            "event=item_move module=store status=ok item={item_id} from={source} to={target}"
        );
        Ok(())
    }

    /// Multi-select toggle for one category.
    ///
    /// Selected items are deselected into uncategorized; anything else is
    /// moved into `category`. Returns the destination bucket.
    ///
    /// # Errors
    /// - `InvariantError::CannotToggleUncategorized` for the reserved bucket.
    /// - Same errors as [`Self::move_item`].
    pub fn toggle_item(
        &mut self,
        item_id: ItemId,
        category: BucketId,
    ) -> AssignmentResult<BucketId> {
        self.ensure_bucket(category)?;
        let uncategorized = self.uncategorized_id();
        if category == uncategorized {
            return Err(self.reject(InvariantError::CannotToggleUncategorized(category)).into());
        }

        let current = self.locate_working(item_id)?;
        let destination = if current == category {
            uncategorized
        } else {
            category
        };
        self.move_item(item_id, destination)?;
        Ok(destination)
    }

    /// Folds working membership into applied and flags relocated items.
    pub fn apply_assignment(&mut self) -> &AppliedPartition {
        let summary = reconcile(&mut self.applied, &self.working);
        info!(
            "event=assignment_apply module=store status=ok moved={} removed={} settled={}",
            summary.moved.len(),
            summary.removed,
            summary.settled
        );
        self.last_summary = summary;
        &self.applied
    }

    /// Applies pending working changes with no item flagged as moved.
    ///
    /// Used on layout changes where a transition would render incorrectly.
    pub fn clear_animations_and_commit(&mut self) -> &AppliedPartition {
        self.apply_assignment();
        let cleared = clear_flags(&mut self.applied);
        info!("event=animations_clear module=store status=ok cleared={cleared}");
        &self.applied
    }

    /// Ids of applied items flagged by the last reconciliation.
    pub fn moved_items(&self) -> Vec<ItemId> {
        self.applied.moved_ids()
    }

    /// Whether working membership differs from applied membership.
    pub fn has_pending_changes(&self) -> bool {
        self.working.entries().any(|(bucket_id, item)| {
            !self.applied.contains(bucket_id, item.id)
        })
    }

    /// Current multi-select selection for one bucket, in working order.
    pub fn selected_ids(&self, bucket_id: BucketId) -> AssignmentResult<Vec<ItemId>> {
        self.ensure_bucket(bucket_id)?;
        Ok(self
            .working
            .bucket(bucket_id)
            .map(|bucket| bucket.ids())
            .unwrap_or_default())
    }

    /// Every applied item in bucket order; the multi-select's options.
    pub fn selectable_items(&self) -> Vec<&AppliedItem> {
        self.applied.entries().map(|(_, item)| item).collect()
    }

    /// Label and applied count for every bucket, uncategorized last.
    pub fn bucket_summaries(&self) -> Vec<BucketSummary> {
        let uncategorized = self.uncategorized_id();
        self.applied
            .buckets()
            .iter()
            .enumerate()
            .map(|(bucket_id, bucket)| BucketSummary {
                bucket_id,
                label: self
                    .categories
                    .get(bucket_id)
                    .map(|category| category.name.clone())
                    .unwrap_or_else(|| self.uncategorized_label.clone()),
                count: bucket.len(),
                is_uncategorized: bucket_id == uncategorized,
            })
            .collect()
    }

    pub fn snapshot(&self) -> AssignmentSnapshot<'_> {
        AssignmentSnapshot {
            categories: &self.categories,
            uncategorized_label: &self.uncategorized_label,
            applied: &self.applied,
        }
    }

    /// Checks exclusivity of both partitions and that they share one item
    /// universe.
    pub fn verify_invariants(&self) -> Result<(), InvariantError> {
        self.applied
            .check_exclusivity()
            .map_err(InvariantError::DuplicatePlacement)?;
        self.working
            .check_exclusivity()
            .map_err(InvariantError::DuplicatePlacement)?;

        let applied: BTreeSet<ItemId> = self.applied.item_ids().into_iter().collect();
        let working: BTreeSet<ItemId> = self.working.item_ids().into_iter().collect();
        if let Some(&stray) = applied.symmetric_difference(&working).next() {
            return Err(InvariantError::UniverseMismatch(stray));
        }
        Ok(())
    }

    fn ensure_bucket(&self, bucket: BucketId) -> Result<(), InvariantError> {
        let bucket_count = self.bucket_count();
        if bucket >= bucket_count {
            return Err(self.reject(InvariantError::BucketOutOfRange {
                bucket,
                bucket_count,
            }));
        }
        Ok(())
    }

    fn locate_working(&self, item_id: ItemId) -> Result<BucketId, InvariantError> {
        self.working
            .locate(item_id)
            .ok_or_else(|| self.reject(InvariantError::ItemNotFound(item_id)))
    }

    fn reject(&self, err: InvariantError) -> InvariantError {
        warn!("event=invariant_violation module=store status=error reason={err}");
        err
    }
}

fn settled_copy(working: &WorkingPartition) -> AppliedPartition {
    let mut applied = AppliedPartition::with_categories(working.bucket_count() - 1);
    for (bucket_id, item) in working.entries() {
        if let Some(bucket) = applied.bucket_mut(bucket_id) {
            bucket.push(AppliedItem::settled(item.clone()));
        }
    }
    debug_assert_eq!(applied.item_ids(), working.item_ids());
    applied
}
