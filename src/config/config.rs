use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.fireworks.ai/inference/v1";
pub const DEFAULT_MODEL: &str = "accounts/sentientfoundation/loadBalancers/gpt-oss-120b";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 6000;

pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IMPROVE_TIMEOUT_SECS: u64 = 45;
pub const DEFAULT_ANALYZE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("API key not found; set FIREWORKS_API_KEY or llm.api_key")]
    MissingApiKey,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer keys accepted by the web API. Empty disables the guard. The
    /// bundled page asks for a key on its first 401.
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_keys: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Certificate validation for the model endpoint. Only turn this off
    /// against a local proxy you control.
    pub verify_tls: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: "${FIREWORKS_API_KEY}".to_string(),
            base_url: "${FIREWORKS_BASE_URL}".to_string(),
            model: "${_FIREWORKS_DEDICATED_GPT_OSS_120B_MODEL_NAME}".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            verify_tls: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Generate, improve, then analyze assumptions.
    #[default]
    ThreeCall,
    /// One expert call, raw output.
    Single,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    pub mode: PipelineMode,
    pub generate_timeout_secs: u64,
    pub improve_timeout_secs: u64,
    pub analyze_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::ThreeCall,
            generate_timeout_secs: DEFAULT_GENERATE_TIMEOUT_SECS,
            improve_timeout_secs: DEFAULT_IMPROVE_TIMEOUT_SECS,
            analyze_timeout_secs: DEFAULT_ANALYZE_TIMEOUT_SECS,
        }
    }
}

impl PipelineConfig {
    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }

    pub fn improve_timeout(&self) -> Duration {
        Duration::from_secs(self.improve_timeout_secs)
    }

    pub fn analyze_timeout(&self) -> Duration {
        Duration::from_secs(self.analyze_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Loads `path` (optional), `.env` and `SOLCOPILOT__*` variables, then
    /// validates the result.
    pub fn load(path: &str) -> Result<Self, ConfigurationError> {
        dotenv::dotenv().ok();

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(::config::Environment::with_prefix("SOLCOPILOT").separator("__"))
            .build()?;

        Self::from_settings(settings)
    }

    pub fn from_settings(settings: ::config::Config) -> Result<Self, ConfigurationError> {
        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${FIREWORKS_API_KEY}
        app_config.server.host = expand_env(&app_config.server.host);
        app_config.llm.api_key = expand_env(&app_config.llm.api_key);
        app_config.llm.base_url = expand_env(&app_config.llm.base_url);
        app_config.llm.model = expand_env(&app_config.llm.model);

        if app_config.llm.base_url.is_empty() {
            app_config.llm.base_url = DEFAULT_BASE_URL.to_string();
        }
        if app_config.llm.model.is_empty() {
            app_config.llm.model = DEFAULT_MODEL.to_string();
        }

        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigurationError::Invalid(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigurationError::Invalid(
                "llm.max_tokens must be greater than zero".to_string(),
            ));
        }
        let timeouts = [
            ("generate", self.pipeline.generate_timeout_secs),
            ("improve", self.pipeline.improve_timeout_secs),
            ("analyze", self.pipeline.analyze_timeout_secs),
        ];
        for (step, secs) in timeouts {
            if secs == 0 {
                return Err(ConfigurationError::Invalid(format!(
                    "pipeline.{}_timeout_secs must be greater than zero",
                    step
                )));
            }
        }
        Ok(())
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_default()
    } else {
        val.to_string()
    }
}
