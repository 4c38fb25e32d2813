//! Bucket and partition containers.
//!
//! # Responsibility
//! - Hold one ordered bucket per category plus the reserved uncategorized
//!   bucket at the last index.
//! - Provide membership lookups used by move and reconciliation.
//!
//! # Invariants
//! - Bucket count is fixed at construction and is always at least one.
//! - Exclusivity: an item id appears in exactly one bucket. Mutators in this
//!   module do not enforce it on their own; the store keeps it by always
//!   pairing a removal with an insertion.

use crate::model::item::{AppliedItem, ItemId, TextItem};
use serde::Serialize;
use std::collections::BTreeSet;

/// Index of a bucket inside a partition. `categories.len()` is uncategorized.
pub type BucketId = usize;

/// Entry stored inside a bucket.
pub trait PartitionEntry {
    fn item_id(&self) -> ItemId;
}

impl PartitionEntry for TextItem {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

impl PartitionEntry for AppliedItem {
    fn item_id(&self) -> ItemId {
        self.id()
    }
}

/// Ordered items assigned to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bucket<E> {
    entries: Vec<E>,
}

impl<E> Default for Bucket<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: PartitionEntry> Bucket<E> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.position(item_id).is_some()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(PartitionEntry::item_id).collect()
    }

    pub(crate) fn position(&self, item_id: ItemId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.item_id() == item_id)
    }

    pub(crate) fn push(&mut self, entry: E) {
        self.entries.push(entry);
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> E {
        self.entries.remove(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.entries.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.entries.iter_mut()
    }
}

impl<'a, E: PartitionEntry> IntoIterator for &'a Bucket<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Full set of buckets covering every item of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Partition<E> {
    buckets: Vec<Bucket<E>>,
}

/// Working side: what the user edits before committing.
pub type WorkingPartition = Partition<TextItem>;
/// Applied side: what is rendered, with move flags.
pub type AppliedPartition = Partition<AppliedItem>;

impl<E: PartitionEntry> Partition<E> {
    /// Creates `category_count + 1` empty buckets.
    pub fn with_categories(category_count: usize) -> Self {
        Self {
            buckets: (0..=category_count).map(|_| Bucket::default()).collect(),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Id of the reserved uncategorized bucket.
    pub fn uncategorized_id(&self) -> BucketId {
        self.buckets.len() - 1
    }

    pub fn bucket(&self, bucket_id: BucketId) -> Option<&Bucket<E>> {
        self.buckets.get(bucket_id)
    }

    pub fn buckets(&self) -> &[Bucket<E>] {
        &self.buckets
    }

    /// Finds the bucket currently holding `item_id`.
    pub fn locate(&self, item_id: ItemId) -> Option<BucketId> {
        self.buckets
            .iter()
            .position(|bucket| bucket.contains(item_id))
    }

    pub fn contains(&self, bucket_id: BucketId, item_id: ItemId) -> bool {
        self.bucket(bucket_id)
            .is_some_and(|bucket| bucket.contains(item_id))
    }

    /// Every item id, bucket by bucket.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.buckets.iter().flat_map(Bucket::ids).collect()
    }

    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// Iterates `(bucket_id, entry)` pairs in bucket order.
    pub fn entries(&self) -> impl Iterator<Item = (BucketId, &E)> {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(bucket_id, bucket)| bucket.iter().map(move |entry| (bucket_id, entry)))
    }

    /// Returns the first id found in more than one place, if any.
    pub fn check_exclusivity(&self) -> Result<(), ItemId> {
        let mut seen = BTreeSet::new();
        for (_, entry) in self.entries() {
            if !seen.insert(entry.item_id()) {
                return Err(entry.item_id());
            }
        }
        Ok(())
    }

    pub(crate) fn bucket_mut(&mut self, bucket_id: BucketId) -> Option<&mut Bucket<E>> {
        self.buckets.get_mut(bucket_id)
    }

    pub(crate) fn buckets_mut(&mut self) -> &mut [Bucket<E>] {
        &mut self.buckets
    }
}

impl AppliedPartition {
    /// Ids of items flagged by the last reconciliation.
    pub fn moved_ids(&self) -> Vec<ItemId> {
        self.entries()
            .filter(|(_, entry)| entry.just_moved)
            .map(|(_, entry)| entry.id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PartitionEntry, WorkingPartition};
    use crate::model::item::TextItem;

    #[test]
    fn with_categories_reserves_uncategorized_bucket() {
        let partition = WorkingPartition::with_categories(0);
        assert_eq!(partition.bucket_count(), 1);
        assert_eq!(partition.uncategorized_id(), 0);

        let partition = WorkingPartition::with_categories(3);
        assert_eq!(partition.bucket_count(), 4);
        assert_eq!(partition.uncategorized_id(), 3);
    }

    #[test]
    fn locate_and_contains_follow_membership() {
        let mut partition = WorkingPartition::with_categories(2);
        let item = TextItem::new("a");
        let id = item.item_id();
        partition.bucket_mut(1).unwrap().push(item);

        assert_eq!(partition.locate(id), Some(1));
        assert!(partition.contains(1, id));
        assert!(!partition.contains(0, id));
        assert!(!partition.contains(9, id));
        assert_eq!(partition.item_count(), 1);
    }

    #[test]
    fn check_exclusivity_reports_duplicate() {
        let mut partition = WorkingPartition::with_categories(1);
        let item = TextItem::new("twice");
        let id = item.id;
        partition.bucket_mut(0).unwrap().push(item.clone());
        assert!(partition.check_exclusivity().is_ok());

        partition.bucket_mut(1).unwrap().push(item);
        assert_eq!(partition.check_exclusivity(), Err(id));
    }
}
