use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Unknown protection mode: {0}")]
    UnknownProtection(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),
}
