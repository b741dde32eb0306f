//! Endpoint registry
//!
//! Static mapping from configuration-type name to API paths and the write
//! strategy used when replaying that type into a destination backend.

use crate::error::{MigrateError, Result};

/// How a configuration type is written to the destination API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Single PUT replacing the whole configuration
    Replace,
    /// One POST per item, creating each object fresh
    CreateEach,
    /// One PUT per item at `{import_path}/{id}`
    UpdateEach,
}

/// API endpoints and write behavior for one configuration type
#[derive(Debug, Clone, Copy)]
pub struct EndpointDescriptor {
    pub config_type: &'static str,
    pub export_path: &'static str,
    pub import_path: &'static str,
    pub strategy: WriteStrategy,
    /// Field holding the object's backend identifier, where one exists
    pub id_key: Option<&'static str>,
}

const fn endpoint(
    config_type: &'static str,
    export_path: &'static str,
    import_path: &'static str,
    strategy: WriteStrategy,
    id_key: Option<&'static str>,
) -> EndpointDescriptor {
    EndpointDescriptor {
        config_type,
        export_path,
        import_path,
        strategy,
        id_key,
    }
}

/// All registered configuration types, in processing order
static ENDPOINTS: &[EndpointDescriptor] = &[
    endpoint(
        "applications",
        "/application-monitoring/settings/application",
        "/application-monitoring/settings/application",
        WriteStrategy::CreateEach,
        Some("id"),
    ),
    endpoint(
        "services",
        "/application-monitoring/services",
        "/application-monitoring/settings/service",
        WriteStrategy::CreateEach,
        Some("id"),
    ),
    endpoint(
        "manual-services",
        "/application-monitoring/settings/manual-service",
        "/application-monitoring/settings/manual-service",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "alert-channels",
        "/events/settings/alertingChannels",
        "/events/settings/alertingChannels",
        WriteStrategy::CreateEach,
        Some("id"),
    ),
    endpoint(
        "alert-configs",
        "/events/settings/alerts",
        "/events/settings/alerts",
        WriteStrategy::UpdateEach,
        Some("id"),
    ),
    endpoint(
        "global-application-smart-alerts",
        "/events/settings/global-alert-configs/applications",
        "/events/settings/global-alert-configs/applications",
        WriteStrategy::CreateEach,
        Some("id"),
    ),
    endpoint(
        "custom-event-specifications",
        "/events/settings/event-specifications/custom",
        "/events/settings/event-specifications/custom",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "global-custom-payloads",
        "/events/settings/custom-payload-configurations",
        "/events/settings/custom-payload-configurations",
        WriteStrategy::Replace,
        None,
    ),
    endpoint(
        "maintenance",
        "/settings/v2/maintenance",
        "/settings/v2/maintenance",
        WriteStrategy::UpdateEach,
        Some("id"),
    ),
    endpoint(
        "api-tokens",
        "/settings/api-tokens",
        "/settings/api-tokens",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "groups",
        "/settings/rbac/groups",
        "/settings/rbac/groups",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "custom-dashboards",
        "/custom-dashboard",
        "/custom-dashboard",
        WriteStrategy::CreateEach,
        Some("id"),
    ),
    endpoint(
        "synthetic-tests",
        "/synthetics/settings/tests",
        "/synthetics/settings/tests",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "synthetic-credentials",
        "/synthetics/settings/credentials/associations",
        "/synthetics/settings/credentials/associations",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "slo",
        "/settings/slo",
        "/settings/slo",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "sli",
        "/settings/sli",
        "/settings/sli",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "website-config",
        "/website-monitoring/config",
        "/website-monitoring/config",
        WriteStrategy::CreateEach,
        None,
    ),
    endpoint(
        "mobile-app-config",
        "/mobile-app-monitoring/config",
        "/mobile-app-monitoring/config",
        WriteStrategy::CreateEach,
        None,
    ),
];

/// Look up the descriptor for a configuration type
pub fn lookup(config_type: &str) -> Result<&'static EndpointDescriptor> {
    ENDPOINTS
        .iter()
        .find(|e| e.config_type == config_type)
        .ok_or_else(|| {
            MigrateError::Config(format!("Unknown configuration type '{}'", config_type))
        })
}

/// All registered type names, in registry order
pub fn all_types() -> impl Iterator<Item = &'static str> {
    ENDPOINTS.iter().map(|e| e.config_type)
}
