use anyhow::Result;
use std::path::Path;
use tracing::info;

use confsync::{ApiClient, MigratorConfig};

use super::{expand_types, DRY_RUN_LOG_FILE};

/// Run the import command.
pub async fn run(
    config: &MigratorConfig,
    config_type: &str,
    export_dir: &Path,
    dry_run: bool,
) -> Result<()> {
    let types = expand_types(config_type)?;

    let backend = config.destination()?;
    let api = ApiClient::new(backend)?;

    for config_type in types {
        confsync::import_config(&api, config_type, export_dir, dry_run).await?;
    }

    if dry_run {
        info!(
            "You can find all output in the {} file for reference.",
            DRY_RUN_LOG_FILE
        );
    }

    Ok(())
}
