pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AudioError, ConfigError, DestinationError};
pub use types::{EncodedAudio, InlineAudio, DEFAULT_PCM_MIME_TYPE, WAV_MIME_TYPE};
