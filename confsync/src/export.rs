//! Export engine
//!
//! Fetches a configuration type from the source backend and writes it to
//! `<export_dir>/<type>.json`. Dashboards need a list-then-detail fetch
//! because the list endpoint returns summaries only.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::endpoints::{self, EndpointDescriptor};
use crate::error::Result;

/// Export a configuration type from the source backend to a file.
pub async fn export_config(api: &ApiClient, config_type: &str, export_dir: &Path) -> Result<()> {
    let descriptor = endpoints::lookup(config_type)?;

    info!("Exporting '{}' from {}...", config_type, api.base_url());

    let data = if config_type == "custom-dashboards" {
        export_dashboards(api, descriptor).await?
    } else {
        api.get(descriptor.export_path).await?
    };

    fs::create_dir_all(export_dir)?;
    let path = export_dir.join(format!("{}.json", config_type));
    fs::write(&path, serde_json::to_string_pretty(&data)?)?;

    let count = match &data {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .get("items")
            .and_then(Value::as_array)
            .map_or(1, Vec::len),
        _ => 1,
    };
    info!(
        "Successfully exported {} item(s) to {}",
        count,
        path.display()
    );
    Ok(())
}

/// Fetch each dashboard's full definition; a summary that cannot be
/// resolved is logged and left out without aborting the rest.
async fn export_dashboards(api: &ApiClient, descriptor: &EndpointDescriptor) -> Result<Value> {
    debug!("Fetching dashboard list from {}", descriptor.export_path);
    let summaries = api.get(descriptor.export_path).await?;
    let summaries = summaries.as_array().cloned().unwrap_or_default();
    info!("Found {} dashboards to export.", summaries.len());

    let mut dashboards = Vec::new();
    for summary in summaries {
        let dashboard_id = match summary.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };

        let detail_path = format!("{}/{}", descriptor.export_path, dashboard_id);
        debug!("Fetching full details for dashboard ID: {}", dashboard_id);
        match api.get(&detail_path).await {
            Ok(detail) => dashboards.push(detail),
            Err(e) if e.is_api_error() => {
                warn!(
                    "Could not fetch details for dashboard ID {}. Error: {}",
                    dashboard_id, e
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Value::Array(dashboards))
}
