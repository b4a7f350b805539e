use anyhow::{Context, Result};
use mintwatch_connector::config::HarvestConfig;
use mintwatch_logger::logging::LogConfig;
use serde::Deserialize;

/// The top-level configuration for the `mintwatch` binary.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct HarvesterConfig {
    #[serde(default)]
    pub connector: HarvestConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Loads the configuration from an optional TOML file layered with
/// `MINTWATCH__`-prefixed environment variables.
///
/// Without a file, defaults apply to every key not set in the environment.
pub fn load_config(path: Option<&str>) -> Result<HarvesterConfig> {
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads the overrides from `env` instead of the
/// process environment when it is given.
///
/// Variable names are matched case-insensitively and each `__`-separated
/// segment is converted to kebab-case, so `MINTWATCH__CONNECTOR__PAGINATOR__PAGE_SIZE`
/// sets `connector.paginator.page-size`.
pub fn load_config_with_env(
    path: Option<&str>,
    env: Option<config::Map<String, String>>,
) -> Result<HarvesterConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("MINTWATCH")
            .prefix_separator("__")
            .separator("__")
            .convert_case(config::Case::Kebab)
            .source(env),
    );

    let settings: HarvesterConfig = builder
        .build()
        .context(format!(
            "Failed to build configuration from '{}'",
            path.unwrap_or("<defaults>")
        ))?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    settings
        .connector
        .validate()
        .context("Invalid connector configuration")?;

    Ok(settings)
}
