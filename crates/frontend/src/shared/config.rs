use serde::Deserialize;

/// Frontend configuration.
///
/// Sources, later wins:
/// 1. built-in defaults
/// 2. `config.toml` next to `Cargo.toml`, embedded at compile time
/// 3. `INDENT_ENDPOINT_URL` at compile time, for the endpoint only
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub submission: SubmissionConfig,
    pub indent: IndentConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Pause between the endpoint accepting a batch and the form resetting
    pub settle_delay_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndentConfig {
    /// Used when the next indent number cannot be fetched
    pub fallback_number: String,
}

const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbw4a8syIT0aLF5DGVUIINWfqk1lXx36UOs-jGSLgOGKzAjl_0mpsb6sa7rVA-hQimGt6Q/exec";

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
        }
    }
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            fallback_number: "I-001".to_string(),
        }
    }
}

/// Configuration embedded in the binary
const BUNDLED_CONFIG: &str = include_str!("../../config.toml");

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load configuration. Never fails: a broken bundled file falls back to defaults.
pub fn load_config() -> AppConfig {
    let mut config = match parse_config(BUNDLED_CONFIG) {
        Ok(config) => {
            log::debug!("Loaded bundled config.toml");
            config
        }
        Err(e) => {
            log::warn!("Bundled config.toml is invalid, using defaults: {}", e);
            AppConfig::default()
        }
    };

    if let Some(url) = option_env!("INDENT_ENDPOINT_URL").filter(|u| !u.trim().is_empty()) {
        log::info!("Endpoint overridden at build time: {}", url);
        config.endpoint.base_url = url.trim().to_string();
    }

    config
}
