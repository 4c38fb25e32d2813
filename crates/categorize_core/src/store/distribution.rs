//! Initial item placement.
//!
//! # Invariants
//! - Output assigns every input item to exactly one bucket in
//!   `[0, category_count]`.
//! - Validation finishes before any partition is built.

use crate::config::{DistributionStrategy, StoreConfig};
use crate::model::item::{ItemId, TextItem};
use crate::model::partition::{BucketId, WorkingPartition};
use crate::store::error::ConfigurationError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

/// Placement used when a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialDistribution {
    /// Generated from a configured strategy.
    Strategy {
        strategy: DistributionStrategy,
        seed: Option<u64>,
    },
    /// Caller-provided mapping. Items missing from the map start
    /// uncategorized.
    Explicit(BTreeMap<ItemId, BucketId>),
}

impl Default for InitialDistribution {
    fn default() -> Self {
        Self::Strategy {
            strategy: DistributionStrategy::AllUncategorized,
            seed: None,
        }
    }
}

impl From<&StoreConfig> for InitialDistribution {
    fn from(config: &StoreConfig) -> Self {
        Self::Strategy {
            strategy: config.distribution,
            seed: config.seed,
        }
    }
}

/// Builds the starting working partition.
///
/// # Errors
/// - `DuplicateItemId` when two items share one id.
/// - `UnknownItem` / `BucketOutOfRange` for bad explicit mappings.
pub(crate) fn distribute(
    category_count: usize,
    items: Vec<TextItem>,
    distribution: &InitialDistribution,
) -> Result<WorkingPartition, ConfigurationError> {
    let mut seen = BTreeSet::new();
    for item in &items {
        if !seen.insert(item.id) {
            return Err(ConfigurationError::DuplicateItemId(item.id));
        }
    }

    let bucket_count = category_count + 1;
    let uncategorized = category_count;
    let mut partition = WorkingPartition::with_categories(category_count);

    match distribution {
        InitialDistribution::Explicit(mapping) => {
            for (&item, &bucket) in mapping {
                if !seen.contains(&item) {
                    return Err(ConfigurationError::UnknownItem(item));
                }
                if bucket >= bucket_count {
                    return Err(ConfigurationError::BucketOutOfRange {
                        item,
                        bucket,
                        bucket_count,
                    });
                }
            }
            for item in items {
                let bucket = mapping.get(&item.id).copied().unwrap_or(uncategorized);
                place(&mut partition, bucket, item);
            }
        }
        InitialDistribution::Strategy { strategy, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            match strategy {
                DistributionStrategy::AllUncategorized => {
                    for item in items {
                        place(&mut partition, uncategorized, item);
                    }
                }
                DistributionStrategy::Shuffled => {
                    let mut items = items;
                    items.shuffle(&mut rng);
                    for item in items {
                        place(&mut partition, uncategorized, item);
                    }
                }
                DistributionStrategy::Random => {
                    for item in items {
                        let bucket = rng.gen_range(0..bucket_count);
                        place(&mut partition, bucket, item);
                    }
                }
            }
        }
    }

    Ok(partition)
}

fn place(partition: &mut WorkingPartition, bucket: BucketId, item: TextItem) {
    // Bucket ids are validated or generated in range by the caller.
    if let Some(target) = partition.bucket_mut(bucket) {
        target.push(item);
    }
}
