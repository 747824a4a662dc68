use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub creature: CreatureConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        if let Ok(path) = env::var("HABITMON_CONFIG") {
            return Self::from_path(Path::new(&path));
        }

        let project_root = env::var("HABITMON_ROOT").unwrap_or_else(|_| ".".to_string());
        let default_path = Path::new(&project_root).join("config/habitmon.toml");
        if default_path.exists() {
            return Self::from_path(&default_path);
        }

        let example_path = Path::new(&project_root).join("config/habitmon.example.toml");
        if example_path.exists() {
            tracing::warn!("Using example configuration at {:?}", example_path);
            return Self::from_path(&example_path);
        }

        Ok(Self::default())
    }

    fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config: {:?}", path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    fn default_timeout_secs() -> u64 {
        10
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatureConfig {
    #[serde(default = "CreatureConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "CreatureConfig::default_max_id")]
    pub max_id: u32,
}

impl CreatureConfig {
    fn default_endpoint() -> String {
        "https://pokeapi.co/api/v2/pokemon".into()
    }
    fn default_max_id() -> u32 {
        151
    }
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            max_id: Self::default_max_id(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub provider: WeatherProvider,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type")]
pub enum WeatherProvider {
    #[default]
    #[serde(rename = "static")]
    Static,
    #[serde(rename = "openweathermap")]
    OpenWeatherMap {
        /// API key - can be literal or read from env var if api_key_env is set
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "WeatherProvider::default_api_key_env")]
        api_key_env: String,
        #[serde(default = "WeatherProvider::default_endpoint")]
        endpoint: String,
        #[serde(default = "WeatherProvider::default_lang")]
        lang: String,
    },
}

impl WeatherProvider {
    fn default_api_key_env() -> String {
        "OPENWEATHER_API_KEY".into()
    }
    fn default_endpoint() -> String {
        "https://api.openweathermap.org/data/2.5/weather".into()
    }
    fn default_lang() -> String {
        "en".into()
    }

    /// Get the weather API key, checking env var first
    pub fn api_key(&self) -> Option<String> {
        match self {
            WeatherProvider::OpenWeatherMap {
                api_key,
                api_key_env,
                ..
            } => resolve_key(api_key_env, api_key.as_deref()),
            WeatherProvider::Static => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Local,
    Llm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub generator: GeneratorKind,
    #[serde(default = "ReportConfig::default_model")]
    pub model: String,
    #[serde(default = "ReportConfig::default_system_prompt")]
    pub system_prompt: String,
    #[serde(default)]
    pub provider: LlmProvider,
}

impl ReportConfig {
    fn default_model() -> String {
        "gpt-5-mini".into()
    }
    fn default_system_prompt() -> String {
        "You are a game coach. Review the player's habit check-in and write a short condition report."
            .into()
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            model: Self::default_model(),
            system_prompt: Self::default_system_prompt(),
            provider: LlmProvider::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi {
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "LlmProvider::default_api_key_env")]
        api_key_env: String,
        #[serde(default = "LlmProvider::default_openai_endpoint")]
        endpoint: String,
    },
    #[serde(rename = "lmstudio")]
    LmStudio { endpoint: String },
}

impl LlmProvider {
    fn default_api_key_env() -> String {
        "OPENAI_API_KEY".into()
    }
    fn default_openai_endpoint() -> String {
        "https://api.openai.com".into()
    }

    pub fn openai_api_key(&self) -> Option<String> {
        match self {
            LlmProvider::OpenAi {
                api_key,
                api_key_env,
                ..
            } => resolve_key(api_key_env, api_key.as_deref()),
            LlmProvider::LmStudio { .. } => None,
        }
    }
}

impl Default for LlmProvider {
    fn default() -> Self {
        LlmProvider::OpenAi {
            api_key: None,
            api_key_env: Self::default_api_key_env(),
            endpoint: Self::default_openai_endpoint(),
        }
    }
}

fn resolve_key(env_name: &str, literal: Option<&str>) -> Option<String> {
    if let Ok(key) = env::var(env_name) {
        if !key.trim().is_empty() {
            return Some(key);
        }
    }
    literal
        .filter(|key| !key.trim().is_empty())
        .map(str::to_string)
}
