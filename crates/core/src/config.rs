use serde::Deserialize;

/// Environment variable holding the generative API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root application configuration. Loaded from an optional `brandkit.toml`
/// and environment variables with the prefix `BRANDKIT__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub studio: StudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Falls back to `OPENAI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_image_size")]
    pub image_size: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_logo_dir")]
    pub logo_dir: String,
    #[serde(default = "default_max_logo_bytes")]
    pub max_logo_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
    #[serde(default = "default_studio_api_url")]
    pub api_url: String,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8002
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_text_model() -> String {
    "gpt-4".to_string()
}
fn default_image_model() -> String {
    "dall-e-3".to_string()
}
fn default_image_size() -> String {
    "1024x1024".to_string()
}
fn default_system_prompt() -> String {
    "You are a marketing expert.".to_string()
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_logo_dir() -> String {
    "static/logos".to_string()
}
fn default_max_logo_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_studio_api_url() -> String {
    "http://127.0.0.1:8002".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            system_prompt: default_system_prompt(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GenerationConfig {
    /// Configured key, or the `OPENAI_API_KEY` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            logo_dir: default_logo_dir(),
            max_logo_bytes: default_max_logo_bytes(),
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_url: default_studio_api_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional `brandkit` config file and
    /// environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("brandkit").required(false))
            .add_source(
                config::Environment::with_prefix("BRANDKIT")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_contract() {
        let config = AppConfig::default();
        assert_eq!(config.api.http_port, 8002);
        assert_eq!(config.generation.text_model, "gpt-4");
        assert_eq!(config.generation.image_model, "dall-e-3");
        assert_eq!(config.generation.image_size, "1024x1024");
        assert_eq!(config.uploads.logo_dir, "static/logos");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"generation": {"text_model": "gpt-4o"}}"#).unwrap();
        assert_eq!(config.generation.text_model, "gpt-4o");
        assert_eq!(config.generation.image_model, "dall-e-3");
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_configured_api_key_wins() {
        let generation = GenerationConfig {
            api_key: Some("sk-configured".to_string()),
            ..GenerationConfig::default()
        };
        assert_eq!(generation.resolve_api_key().as_deref(), Some("sk-configured"));
    }
}
