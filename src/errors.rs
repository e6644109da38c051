use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopRagError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl ShopRagError {
    /// True for errors caused by caller input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, ShopRagError>;
