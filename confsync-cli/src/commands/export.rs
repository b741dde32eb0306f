use anyhow::Result;
use std::path::Path;

use confsync::{ApiClient, MigratorConfig};

use super::expand_types;

/// Run the export command.
pub async fn run(config: &MigratorConfig, config_type: &str, export_dir: &Path) -> Result<()> {
    let types = expand_types(config_type)?;

    let backend = config.source()?;
    let api = ApiClient::new(backend)?;

    for config_type in types {
        confsync::export_config(&api, config_type, export_dir).await?;
    }

    Ok(())
}
