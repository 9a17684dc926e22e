//! Error types for rulekit-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] rulekit_fs::Error),

    #[error("Failed to parse JSON at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Invalid configuration at {path}: unknown keys: {}", .keys.join(", "))]
    UnknownKeys { path: PathBuf, keys: Vec<String> },

    #[error("Invalid configuration at {path}: unsupported target '{target}' (supported: {})", crate::ide::Ide::supported_list())]
    UnsupportedTarget { path: PathBuf, target: String },

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }
}
