use thiserror::Error;

use crate::codec::ImportError;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid document: {0}")]
    Import(#[from] ImportError),

    #[error("No outline lines recognized")]
    NothingRecognized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
