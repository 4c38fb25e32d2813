use categorize_core::{
    AssignmentError, AssignmentStore, Category, ConfigurationError, ContentParams,
    DistributionStrategy, InitialDistribution, StoreConfig, TextItem,
};
use std::collections::BTreeMap;
use uuid::Uuid;

fn categories(names: &[&str]) -> Vec<Category> {
    names
        .iter()
        .map(|name| Category::try_new(*name).unwrap())
        .collect()
}

#[test]
fn zero_categories_still_have_uncategorized_bucket() {
    let items = vec![TextItem::new("lonely")];
    let store =
        AssignmentStore::initialize(Vec::new(), items, &InitialDistribution::default()).unwrap();

    assert_eq!(store.bucket_count(), 1);
    assert_eq!(store.uncategorized_id(), 0);
    assert_eq!(store.applied().bucket(0).unwrap().len(), 1);
}

#[test]
fn explicit_distribution_seeds_both_partitions_unflagged() {
    let items = vec![TextItem::new("a"), TextItem::new("b"), TextItem::new("c")];
    let mut mapping = BTreeMap::new();
    mapping.insert(items[0].id, 1);
    mapping.insert(items[2].id, 0);
    let ids: Vec<_> = items.iter().map(|item| item.id).collect();

    let store = AssignmentStore::initialize(
        categories(&["x", "y"]),
        items,
        &InitialDistribution::Explicit(mapping),
    )
    .unwrap();

    assert_eq!(store.applied().bucket(0).unwrap().ids(), vec![ids[2]]);
    assert_eq!(store.applied().bucket(1).unwrap().ids(), vec![ids[0]]);
    assert_eq!(store.applied().bucket(2).unwrap().ids(), vec![ids[1]]);
    assert_eq!(store.working().item_ids(), store.applied().item_ids());
    assert!(store.moved_items().is_empty());
}

#[test]
fn invalid_setup_is_rejected_as_configuration_error() {
    let item = TextItem::new("dup");
    let err = AssignmentStore::initialize(
        categories(&["x"]),
        vec![item.clone(), item.clone()],
        &InitialDistribution::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AssignmentError::Configuration(ConfigurationError::DuplicateItemId(item.id))
    );
    assert!(!err.is_fatal());

    let mut mapping = BTreeMap::new();
    mapping.insert(item.id, 2);
    let err = AssignmentStore::initialize(
        categories(&["x"]),
        vec![item.clone()],
        &InitialDistribution::Explicit(mapping),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AssignmentError::Configuration(ConfigurationError::BucketOutOfRange { bucket: 2, .. })
    ));

    let nil = TextItem {
        id: Uuid::nil(),
        text: "nil".to_string(),
    };
    let err = AssignmentStore::initialize(Vec::new(), vec![nil], &InitialDistribution::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AssignmentError::Configuration(ConfigurationError::InvalidItem(_))
    ));
}

#[test]
fn from_config_applies_label_and_strategy() {
    let config = StoreConfig::from_json_str(
        r#"{"distribution":"shuffled","seed":11,"uncategorized_label":" Unsorted "}"#,
    )
    .unwrap();
    assert_eq!(config.distribution, DistributionStrategy::Shuffled);
    let items: Vec<_> = (0..6).map(|i| TextItem::new(format!("t{i}"))).collect();

    let store = AssignmentStore::from_config(categories(&["x"]), items, &config).unwrap();

    assert_eq!(store.uncategorized_label(), "Unsorted");
    assert_eq!(store.applied().bucket(1).unwrap().len(), 6);
    assert_eq!(store.bucket_summaries()[1].title(), "Unsorted (6)");
}

#[test]
fn from_content_builds_session_from_text_groups() {
    let params = ContentParams::from_json_str(
        r#"{"textGroups":[
            {"groupName":"Mammals","textElements":["cat","whale"]},
            {"groupName":"Birds","textElements":["owl"]}
        ]}"#,
    )
    .unwrap();

    let store = AssignmentStore::from_content(params, &StoreConfig::default()).unwrap();

    let names: Vec<_> = store.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Mammals", "Birds"]);
    assert_eq!(store.applied().bucket(2).unwrap().len(), 3);
    let texts: Vec<_> = store
        .selectable_items()
        .iter()
        .map(|item| item.item.text.clone())
        .collect();
    assert_eq!(texts, vec!["cat", "whale", "owl"]);
}

#[test]
fn snapshot_serializes_for_presentation_layer() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let items = vec![TextItem::with_id(id, "owl").unwrap()];
    let mut store =
        AssignmentStore::initialize(categories(&["Birds"]), items, &InitialDistribution::default())
            .unwrap();
    store.move_item(id, 0).unwrap();
    store.apply_assignment();

    let json = serde_json::to_value(store.snapshot()).unwrap();

    assert_eq!(json["categories"][0]["name"], "Birds");
    assert_eq!(json["uncategorized_label"], "Uncategorized");
    assert_eq!(json["applied"][0][0]["id"], id.to_string());
    assert_eq!(json["applied"][0][0]["text"], "owl");
    assert_eq!(json["applied"][0][0]["just_moved"], true);
    assert_eq!(json["applied"][1], serde_json::json!([]));
}
