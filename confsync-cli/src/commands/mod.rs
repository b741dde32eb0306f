pub mod export;
pub mod import;

pub const DRY_RUN_LOG_FILE: &str = "dry_run_output.log";

/// Expand `--type all` into every registered type, in registry order.
/// A single unknown type fails here, before any network I/O.
pub fn expand_types(config_type: &str) -> confsync::Result<Vec<&str>> {
    if config_type == "all" {
        Ok(confsync::all_types().collect())
    } else {
        confsync::lookup(config_type)?;
        Ok(vec![config_type])
    }
}
