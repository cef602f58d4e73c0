use async_trait::async_trait;
use storyvox_core::{DestinationError, EncodedAudio};

/// Storage for finished audio blobs.
///
/// Implementations are registered via [`DestinationRegistry`](crate::DestinationRegistry)
/// and hand back a retrievable URL from [`store`](Self::store).
#[async_trait]
pub trait Destination: Send + Sync {
    /// Returns the destination's plugin name (e.g. `"file"`).
    fn name(&self) -> &str;
    /// One-time initialisation with destination-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), DestinationError>;
    /// Persist the blob and return a URL it can be fetched from.
    async fn store(&self, audio: &EncodedAudio) -> Result<String, DestinationError>;
    /// Returns `true` if the destination is currently able to accept audio.
    fn is_healthy(&self) -> bool;
    async fn shutdown(&self) -> Result<(), DestinationError>;
}
