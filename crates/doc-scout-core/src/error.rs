use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocScoutError {
    #[error("Target directory does not exist: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("Manifest already exists: {path} (use --force to overwrite)")]
    ManifestExists { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocScoutError>;

impl DocScoutError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TargetNotFound { .. } => 2,
            Self::ManifestExists { .. } => 3,
            _ => 1,
        }
    }
}
