//! Configuration embedded in the served page.

use td_core::DashboardConfig;
use tracing::warn;

/// `<body>` attribute carrying an optional JSON [`DashboardConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-trackdash-config";

/// Parse the attribute value. Missing, blank or invalid JSON yields the
/// defaults; invalid JSON is logged.
pub fn config_from_attribute(raw: Option<&str>) -> DashboardConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DashboardConfig::default();
    };
    match DashboardConfig::from_json_str(raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "ignoring invalid page configuration");
            DashboardConfig::default()
        }
    }
}
