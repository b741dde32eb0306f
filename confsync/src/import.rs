//! Import replay engine
//!
//! Reads a type's export file, cleans each payload and replays it into the
//! destination backend using the write strategy from the endpoint registry.
//! Iterative strategies isolate per-item API failures; dry-run performs
//! every step except the network write.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::cleaning::clean_for_import;
use crate::client::ApiClient;
use crate::endpoints::{self, EndpointDescriptor, WriteStrategy};
use crate::error::{MigrateError, Result};

/// Success/total counts for one imported configuration type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub succeeded: usize,
    pub total: usize,
}

/// Import a configuration type into the destination backend.
pub async fn import_config(
    api: &ApiClient,
    config_type: &str,
    export_dir: &Path,
    dry_run: bool,
) -> Result<ImportOutcome> {
    let descriptor = endpoints::lookup(config_type)?;
    let data = load_export_file(config_type, export_dir)?;

    info!("Importing '{}' to {}...", config_type, api.base_url());
    if dry_run {
        info!("DRY RUN: No actual changes will be made.");
    }

    let outcome = match descriptor.strategy {
        WriteStrategy::Replace => replace(api, descriptor, data, dry_run).await?,
        WriteStrategy::CreateEach => create_each(api, descriptor, data, dry_run).await?,
        WriteStrategy::UpdateEach => update_each(api, descriptor, data, dry_run).await?,
    };

    info!(
        "Import complete. Successfully imported {}/{} items.",
        outcome.succeeded, outcome.total
    );
    Ok(outcome)
}

fn load_export_file(config_type: &str, export_dir: &Path) -> Result<Value> {
    let path = export_dir.join(format!("{}.json", config_type));
    if !path.exists() {
        return Err(MigrateError::ExportFileMissing(path));
    }

    let content = fs::read_to_string(&path)?;
    let mut data: Value = serde_json::from_str(&content)?;

    // The services export wraps the collection in an `items` field
    if config_type == "services" {
        if let Value::Object(map) = &mut data {
            if let Some(items) = map.remove("items") {
                data = items;
            }
        }
    }

    Ok(data)
}

fn into_items(data: Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Identifier resolution for update-by-id items.
///
/// `Matched` carries the original JSON value so a numeric id survives
/// re-attachment with its type intact.
enum UpdateKey {
    Matched(Value),
    Unidentified,
}

fn update_key(item: &Value, id_key: &str) -> UpdateKey {
    match item.get(id_key) {
        Some(Value::String(s)) if !s.is_empty() => UpdateKey::Matched(Value::String(s.clone())),
        Some(id @ Value::Number(_)) => UpdateKey::Matched(id.clone()),
        _ => UpdateKey::Unidentified,
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Identifier used in log lines for per-item creates: the descriptor's id
/// field, else `name`, else `title`, else a literal placeholder. Probed on
/// the raw item since cleaning may strip the id.
fn display_identifier(item: &Value, id_key: Option<&str>) -> String {
    id_key
        .and_then(|key| item.get(key))
        .and_then(label)
        .or_else(|| item.get("name").and_then(label))
        .or_else(|| item.get("title").and_then(label))
        .unwrap_or_else(|| "N/A".to_string())
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

async fn replace(
    api: &ApiClient,
    descriptor: &EndpointDescriptor,
    data: Value,
    dry_run: bool,
) -> Result<ImportOutcome> {
    info!("Using PUT method to replace entire configuration...");
    let payload = clean_for_import(data, descriptor.config_type);

    if dry_run {
        info!(
            "(Dry Run) Would replace configuration for '{}'",
            descriptor.config_type
        );
        info!("Payload: {}", pretty(&payload));
    } else {
        api.put(descriptor.import_path, &payload).await?;
    }

    info!("Successfully imported '{}'.", descriptor.config_type);
    Ok(ImportOutcome {
        succeeded: 1,
        total: 1,
    })
}

async fn create_each(
    api: &ApiClient,
    descriptor: &EndpointDescriptor,
    data: Value,
    dry_run: bool,
) -> Result<ImportOutcome> {
    let items = into_items(data);
    let total = items.len();
    let mut succeeded = 0;

    for item in items {
        let item_id = display_identifier(&item, descriptor.id_key);
        let payload = clean_for_import(item, descriptor.config_type);

        info!("Preparing to import item: {}", item_id);
        if dry_run {
            succeeded += 1;
            info!("(Dry Run) Would import item: {}", item_id);
            info!("Payload: {}", pretty(&payload));
            continue;
        }

        match api.post(descriptor.import_path, &payload).await {
            Ok(_) => {
                succeeded += 1;
                info!("Successfully imported item: {}", item_id);
            }
            Err(e) if e.is_api_error() => {
                error!("Failed to import item: {}", item_id);
                error!("Error: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(ImportOutcome { succeeded, total })
}

async fn update_each(
    api: &ApiClient,
    descriptor: &EndpointDescriptor,
    data: Value,
    dry_run: bool,
) -> Result<ImportOutcome> {
    let id_key = descriptor.id_key.unwrap_or("id");
    let items = into_items(data);
    let total = items.len();
    let mut succeeded = 0;

    info!("Using PUT method to update items individually...");
    for item in items {
        let id = match update_key(&item, id_key) {
            UpdateKey::Matched(id) => id,
            UpdateKey::Unidentified => {
                warn!(
                    "Skipping item due to missing ID (using id_key: '{}'). Item data: {}",
                    id_key, item
                );
                continue;
            }
        };
        let url_id = id_text(&id);
        let item_label = item
            .get("name")
            .and_then(label)
            .unwrap_or_else(|| url_id.clone());

        let mut payload = clean_for_import(item, descriptor.config_type);
        // The id must be in the payload for the PUT to be valid; cleaning
        // is not allowed to lose it.
        if let Value::Object(map) = &mut payload {
            map.insert(id_key.to_string(), id.clone());
        }
        let import_url = format!("{}/{}", descriptor.import_path, url_id);

        info!("Preparing to update item: {} (ID: {})", item_label, url_id);
        if dry_run {
            succeeded += 1;
            info!("(Dry Run) Would update item: {}", item_label);
            info!("URL: PUT {}", import_url);
            info!("Payload: {}", pretty(&payload));
            continue;
        }

        match api.put(&import_url, &payload).await {
            Ok(_) => {
                succeeded += 1;
                info!("Successfully updated item: {}", item_label);
            }
            Err(e) if e.is_api_error() => {
                error!("Failed to update item: {}", item_label);
                error!("Error: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(ImportOutcome { succeeded, total })
}
