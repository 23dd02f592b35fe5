use anyhow::Context;
use serde::Deserialize;
use shared_kernel::configuration::config;
use shared_kernel::tracing::TelemetrySettings;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4943/canister-api-endpoint/get_product";
pub const SERVICE_NAME: &str = "product-lookup";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupSettings {
    pub endpoint: String,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

impl LookupSettings {
    pub fn endpoint(&self) -> anyhow::Result<Url> {
        Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid lookup endpoint {:?}", self.endpoint))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub lookup: LookupSettings,
    pub telemetry: TelemetrySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup: LookupSettings::default(),
            telemetry: TelemetrySettings {
                service_name: SERVICE_NAME.to_owned(),
                otlp_enabled: false,
            },
        }
    }
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        config::<Settings>().map(Settings::with_service_name_fallback)
    }

    /// A `telemetry` section without `service_name` still names this service.
    fn with_service_name_fallback(mut self) -> Self {
        if self.telemetry.service_name.is_empty() {
            self.telemetry.service_name = SERVICE_NAME.to_owned();
        }
        self
    }
}
