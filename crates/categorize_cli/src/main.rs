//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load a session from a content JSON file (or a built-in sample).
//! - Drive one scripted move/apply/clear cycle and print applied snapshots.
//!
//! Usage: `categorize_cli [content.json] [config.json]`.
//! Set `CATEGORIZE_LOG_DIR` to an absolute path to enable file logs.

use categorize_core::{AssignmentStore, ContentParams, StoreConfig};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const SAMPLE_CONTENT: &str = r#"{
  "textGroups": [
    { "groupName": "Mammals", "textElements": ["cat", "whale"] },
    { "groupName": "Birds", "textElements": ["owl", "penguin"] }
  ]
}"#;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("categorize_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("CATEGORIZE_LOG_DIR") {
        categorize_core::init_logging(categorize_core::default_log_level(), &log_dir)?;
    }

    let mut args = std::env::args().skip(1);
    let content = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_CONTENT.to_string(),
    };
    let config = match args.next() {
        Some(path) => StoreConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => StoreConfig::default(),
    };

    let mut store = AssignmentStore::from_content(ContentParams::from_json_str(&content)?, &config)?;
    println!("categorize_core version={}", categorize_core::core_version());
    print_titles(&store);

    // Spread items round-robin over the categories.
    let category_count = store.categories().len();
    if category_count > 0 {
        let ids = store.working().item_ids();
        for (index, item_id) in ids.into_iter().enumerate() {
            store.move_item(item_id, index % category_count)?;
        }
    }
    store.apply_assignment();
    info!(
        "event=cli_apply module=cli status=ok moved={}",
        store.last_summary().moved.len()
    );
    print_titles(&store);
    println!("{}", serde_json::to_string_pretty(&store.snapshot())?);

    store.clear_animations_and_commit();
    println!("moved after clear={}", store.moved_items().len());
    Ok(())
}

fn print_titles(store: &AssignmentStore) {
    let titles: Vec<String> = store
        .bucket_summaries()
        .iter()
        .map(|summary| summary.title())
        .collect();
    println!("{}", titles.join(" | "));
}
