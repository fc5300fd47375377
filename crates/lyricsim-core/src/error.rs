use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not a lyricsim artifact (bad magic bytes)")]
    BadMagic,

    #[error("unsupported artifact version {found} (this build reads version {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("artifact mismatch: {records} records but similarity matrix is {dimension}x{dimension}")]
    DimensionMismatch { records: usize, dimension: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
