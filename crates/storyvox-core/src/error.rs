use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio decode failed at chunk {index}: {reason}")]
    DecodeFailed { index: usize, reason: String },

    #[error("no audio produced")]
    NoAudioProduced,

    #[error("audio source failed: {0}")]
    SourceFailed(String),

    #[error("audio payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("invalid WAV header: {0}")]
    InvalidHeader(String),
}

#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("destination initialization failed: {0}")]
    InitializationFailed(String),

    #[error("failed to store audio: {0}")]
    StoreFailed(String),

    #[error("destination not found: {0}")]
    NotFound(String),
}
