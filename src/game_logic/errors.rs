use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GauntletError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("File system operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Level-related errors
    #[error("Level file not found at path: {path}")]
    LevelFileNotFound { path: PathBuf },

    #[error("Corrupted level file: {reason}")]
    CorruptedLevelFile { reason: String },

    #[error("Level validation failed: {reason}")]
    LevelValidationFailed { reason: String },

    #[error("Invalid level data: {reason}")]
    InvalidLevelData { reason: String },

    // Command-line errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Result type alias for all fallible operations
pub type GauntletResult<T> = Result<T, GauntletError>;
