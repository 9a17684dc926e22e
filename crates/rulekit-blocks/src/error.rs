//! Error types for rulekit-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Managed block not found: {id}")]
    BlockNotFound { id: String },
}
