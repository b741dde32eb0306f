//! confsync: migrate monitoring-backend configuration between instances
//!
//! Exports configuration types (applications, alert rules, dashboards,
//! groups, tokens, ...) from a source backend to local JSON files and
//! replays them into a destination backend, cleaning backend-generated
//! fields on the way.

pub mod cleaning;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod export;
pub mod import;

pub use cleaning::clean_for_import;
pub use client::ApiClient;
pub use config::{BackendConfig, MigratorConfig};
pub use endpoints::{all_types, lookup, EndpointDescriptor, WriteStrategy};
pub use error::{MigrateError, Result};
pub use export::export_config;
pub use import::{import_config, ImportOutcome};
