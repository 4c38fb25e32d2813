//! Text item domain model.
//!
//! # Responsibility
//! - Define the content unit that gets sorted into categories.
//! - Define the applied-side wrapper that carries the one-shot move flag.
//!
//! # Invariants
//! - `id` is stable for the whole session and never reused for another item.
//! - Items are created once at initialization and only relocated afterwards.
//! - `just_moved` exists only on applied entries; working entries carry no
//!   animation state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every sortable text item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Validation errors for item construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Nil UUID cannot identify an item.
    NilId,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be the nil uuid"),
        }
    }
}

impl Error for ItemValidationError {}

/// One sortable text snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// Stable identity used by every move/apply call.
    pub id: ItemId,
    /// Display payload. Opaque to the store.
    pub text: String,
}

impl TextItem {
    /// Creates an item with a generated stable ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }

    /// Creates an item with a caller-provided stable ID.
    ///
    /// Used when the host already owns item identity.
    ///
    /// # Errors
    /// - Returns [`ItemValidationError::NilId`] for the nil UUID.
    pub fn with_id(id: ItemId, text: impl Into<String>) -> Result<Self, ItemValidationError> {
        if id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        Ok(Self {
            id,
            text: text.into(),
        })
    }
}

/// Item as placed in the applied partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedItem {
    #[serde(flatten)]
    pub item: TextItem,
    /// `true` iff the last reconciliation relocated this item.
    pub just_moved: bool,
}

impl AppliedItem {
    /// Wraps an item that did not move.
    pub fn settled(item: TextItem) -> Self {
        Self {
            item,
            just_moved: false,
        }
    }

    /// Wraps an item that just arrived in its bucket.
    pub fn arrived(item: TextItem) -> Self {
        Self {
            item,
            just_moved: true,
        }
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }
}

#[cfg(test)]
mod tests {
    use super::{AppliedItem, ItemValidationError, TextItem};
    use uuid::Uuid;

    #[test]
    fn new_generates_non_nil_id() {
        let item = TextItem::new("Rust");
        assert!(!item.id.is_nil());
        assert_eq!(item.text, "Rust");
    }

    #[test]
    fn with_id_rejects_nil() {
        let err = TextItem::with_id(Uuid::nil(), "nil").unwrap_err();
        assert_eq!(err, ItemValidationError::NilId);
    }

    #[test]
    fn applied_item_serializes_flat() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let item = TextItem::with_id(id, "ownership").unwrap();
        let json = serde_json::to_value(AppliedItem::arrived(item)).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["text"], "ownership");
        assert_eq!(json["just_moved"], true);
    }
}
