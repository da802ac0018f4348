use thiserror::Error;

use crate::core::types::ObjectId;

#[derive(Error, Debug)]
pub enum MudError {
    #[error("Object not found or recycled: {0}")]
    StaleObject(ObjectId),

    #[error("Failed to construct the Universe/TrashBin roots")]
    RootsUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Save file line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Unsupported save file version {0:#010X}")]
    UnsupportedVersion(u32),

    #[error("Unknown {kind} token '{token}' on line {line}")]
    UnknownToken {
        kind: &'static str,
        token: String,
        line: usize,
    },
}

pub type Result<T> = std::result::Result<T, MudError>;
