//! Error types for Mage Craft

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagecraftError {
    #[error("Invalid catalog format: {0}")]
    InvalidCatalogFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Unknown card in deck list: {0}")]
    UnknownCard(String),

    #[error("Card not found: {0}")]
    CardNotFound(u32),

    #[error("Invalid match action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MagecraftError>;
