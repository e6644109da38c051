use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::search::DEFAULT_TOP_K;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Write a daily-rolling log file next to console output
    #[serde(default = "default_true")]
    pub file_output: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
            log_dir: default_log_dir(),
            file_output: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of product records
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/data.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Plain-text store policy document
    #[serde(default = "default_policy_path")]
    pub path: PathBuf,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Chunks with this many words or fewer are dropped
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_policy_top_k")]
    pub top_k: usize,
}

fn default_policy_path() -> PathBuf {
    PathBuf::from("data/policy.txt")
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_chunk_overlap() -> usize {
    50
}

const fn default_min_words() -> usize {
    5
}

const fn default_policy_top_k() -> usize {
    5
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            path: default_policy_path(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            min_words: default_min_words(),
            top_k: default_policy_top_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    /// Character budget for the prompt context built from search results
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

const fn default_max_context_chars() -> usize {
    8000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: true,
        }
    }
}

/// Settings handed to whatever calls the language model downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_llm_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

const fn default_temperature() -> f32 {
    0.3
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            temperature: default_temperature(),
        }
    }
}

/// Candidate config files, in lookup order
const CONFIG_FILES: &[&str] = &["config.toml", "config.example.toml"];

/// Where the configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No config file found; built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Look for `config.toml`, then `config.example.toml`, in the working directory
    pub fn locate() -> Self {
        Self::locate_in(Path::new("."))
    }

    pub fn locate_in(dir: &Path) -> Self {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map_or(Self::Defaults, Self::File)
    }

    /// True when running from the example file
    pub fn is_example(&self) -> bool {
        matches!(self, Self::File(path) if path.file_name().is_some_and(|name| name == "config.example.toml"))
    }

    /// Report the source; call once a subscriber is installed
    pub fn log(&self) {
        match self {
            Self::File(_) if self.is_example() => {
                warn!("Using config.example.toml. Please create config.toml for production use.");
            }
            Self::File(path) => info!("Configuration loaded from {}", path.display()),
            Self::Defaults => warn!("No config file found, using built-in defaults"),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        let source = ConfigSource::locate();
        source.log();
        Self::load_from(&source)
    }

    /// Load configuration from an already located source
    pub fn load_from(source: &ConfigSource) -> crate::Result<Self> {
        match source {
            ConfigSource::File(path) => Self::from_file(path),
            ConfigSource::Defaults => Ok(Self::default()),
        }
    }

    /// Reject values that would make the service misbehave at runtime
    pub fn validate(&self) -> crate::Result<()> {
        if self.search.default_top_k == 0 {
            return Err(crate::ShopRagError::Config(
                "search.default_top_k must be at least 1".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(crate::ShopRagError::Config(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.policy.chunk_size == 0 || self.policy.chunk_overlap >= self.policy.chunk_size {
            return Err(crate::ShopRagError::Config(format!(
                "policy.chunk_overlap ({}) must be smaller than policy.chunk_size ({})",
                self.policy.chunk_overlap, self.policy.chunk_size
            )));
        }
        Ok(())
    }

    /// Get catalog path
    pub fn catalog_path(&self) -> &Path {
        &self.catalog.path
    }

    /// Get policy document path
    pub fn policy_path(&self) -> &Path {
        &self.policy.path
    }

    /// Get default number of product results
    pub fn default_top_k(&self) -> usize {
        self.search.default_top_k
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
