//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("service.base_url", crate::service::DEFAULT_SERVICE_URL)?
        .set_default(
            "service.connect_timeout_secs",
            crate::service::DEFAULT_CONNECT_TIMEOUT.as_secs() as i64,
        )?
        .set_default("session.namespace", "")
}
