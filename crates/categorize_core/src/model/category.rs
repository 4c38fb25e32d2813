//! Named category model.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors for category construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryValidationError {
    /// Name is blank after trim.
    BlankName,
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "category name must not be blank"),
        }
    }
}

impl Error for CategoryValidationError {}

/// One user-visible category. Its position in the category list is its
/// bucket id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    /// Creates a category with a trimmed, non-blank name.
    pub fn try_new(name: impl Into<String>) -> Result<Self, CategoryValidationError> {
        Ok(Self {
            name: normalize_label(name.into()).ok_or(CategoryValidationError::BlankName)?,
        })
    }
}

/// Trims a display label; `None` when nothing is left.
pub(crate) fn normalize_label(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
