//! Session configuration and host content parameters.
//!
//! # Responsibility
//! - Parse store options (initial distribution, seed, uncategorized label).
//! - Turn host content (`textGroups`) into categories and items.
//!
//! # Invariants
//! - Every option has a default; an empty JSON object is a valid config.
//! - Unknown fields are rejected rather than silently ignored.

use crate::model::category::{normalize_label, Category};
use crate::model::item::TextItem;
use crate::store::error::ConfigurationError;
use serde::Deserialize;

/// Default display name for the reserved bucket.
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// How items are placed when a session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStrategy {
    /// Every item starts uncategorized, in input order.
    #[default]
    AllUncategorized,
    /// Every item starts uncategorized, in shuffled order.
    Shuffled,
    /// Every item starts in a uniformly random bucket.
    Random,
}

/// Store options recognized at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub distribution: DistributionStrategy,
    /// Fixed RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub uncategorized_label: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            distribution: DistributionStrategy::default(),
            seed: None,
            uncategorized_label: DEFAULT_UNCATEGORIZED_LABEL.to_string(),
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.uncategorized_label.trim().is_empty() {
            return Err(ConfigurationError::InvalidUncategorizedLabel);
        }
        Ok(())
    }
}

/// One authored group of texts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGroup {
    pub group_name: String,
    #[serde(default)]
    pub text_elements: Vec<String>,
}

/// Host content parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentParams {
    #[serde(default)]
    pub text_groups: Vec<TextGroup>,
}

impl ContentParams {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds categories in group order and one fresh item per text element.
    ///
    /// Blank text elements are skipped. The authored group of an item is not
    /// kept.
    pub fn into_session_parts(self) -> Result<(Vec<Category>, Vec<TextItem>), ConfigurationError> {
        let mut categories = Vec::with_capacity(self.text_groups.len());
        let mut items = Vec::new();
        for (index, group) in self.text_groups.into_iter().enumerate() {
            let category = Category::try_new(group.group_name)
                .map_err(|source| ConfigurationError::InvalidCategoryName { index, source })?;
            categories.push(category);
            items.extend(
                group
                    .text_elements
                    .into_iter()
                    .filter_map(normalize_label)
                    .map(TextItem::new),
            );
        }
        Ok((categories, items))
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentParams, DistributionStrategy, StoreConfig};
    use crate::store::error::ConfigurationError;

    #[test]
    fn empty_object_yields_defaults() {
        let config = StoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.uncategorized_label, "Uncategorized");
    }

    #[test]
    fn parses_snake_case_strategy_and_seed() {
        let config =
            StoreConfig::from_json_str(r#"{"distribution":"shuffled","seed":7}"#).unwrap();
        assert_eq!(config.distribution, DistributionStrategy::Shuffled);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn rejects_unknown_fields_and_blank_label() {
        let err = StoreConfig::from_json_str(r#"{"layout":"grid"}"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidConfig(_)));

        let err = StoreConfig::from_json_str(r#"{"uncategorized_label":"  "}"#).unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidUncategorizedLabel);
    }

    #[test]
    fn content_params_flatten_groups_into_items() {
        let params = ContentParams::from_json_str(
            r#"{"textGroups":[
                {"groupName":"Fruit","textElements":["apple"," ","pear"]},
                {"groupName":"Tools","textElements":["hammer"]}
            ]}"#,
        )
        .unwrap();
        let (categories, items) = params.into_session_parts().unwrap();

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fruit", "Tools"]);
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["apple", "pear", "hammer"]);
    }

    #[test]
    fn content_params_reject_blank_group_name() {
        let params = ContentParams::from_json_str(
            r#"{"textGroups":[{"groupName":"ok"},{"groupName":""}]}"#,
        )
        .unwrap();
        let err = params.into_session_parts().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidCategoryName { index: 1, .. }
        ));
    }
}
