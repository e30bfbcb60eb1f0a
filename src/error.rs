use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
