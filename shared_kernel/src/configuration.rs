use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";
const DEFAULT_ENVIRONMENT: &str = "local";

/// Loads settings from `./configuration`, layering `base.yaml`, then
/// `<APP_ENVIRONMENT>.yaml` and finally `APP_`-prefixed environment variables
/// (`APP_LOOKUP__ENDPOINT` maps to `lookup.endpoint`).
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let environment =
        std::env::var(ENVIRONMENT_VARIABLE).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());
    config_from_directory(&base_path.join("configuration"), &environment)
}

pub fn config_from_directory<Settings: DeserializeOwned>(
    configuration_directory: &Path,
    environment: &str,
) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(format!("{environment}.yaml")))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
