use crate::content_type::extension_for_mime;
use crate::dest_trait::Destination;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use storyvox_core::{DestinationError, EncodedAudio};

const DEFAULT_PREFIX: &str = "audio/";

#[derive(Debug, Clone)]
struct Settings {
    dir: PathBuf,
    prefix: String,
}

/// Stores audio blobs as files under a local directory.
///
/// Object keys look like `<prefix><unix-millis>-<seq>.<ext>`, with the
/// extension taken from the blob's MIME type.
pub struct FileDestination {
    settings: Mutex<Option<Settings>>,
    store_count: AtomicUsize,
}

impl FileDestination {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(None),
            store_count: AtomicUsize::new(0),
        }
    }

    pub fn store_count(&self) -> usize {
        self.store_count.load(Ordering::Relaxed)
    }

    fn object_key(prefix: &str, seq: usize, mime_type: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!("{prefix}{millis}-{seq}.{}", extension_for_mime(mime_type))
    }
}

impl Default for FileDestination {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Destination for FileDestination {
    fn name(&self) -> &str {
        "file"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), DestinationError> {
        let dir = config
            .get("dir")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                DestinationError::InitializationFailed("missing 'dir' in config".to_string())
            })?;
        let prefix = config
            .get("prefix")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_PREFIX);

        *self.settings.lock().unwrap() = Some(Settings {
            dir: PathBuf::from(dir),
            prefix: prefix.to_string(),
        });
        Ok(())
    }

    async fn store(&self, audio: &EncodedAudio) -> Result<String, DestinationError> {
        let settings = self
            .settings
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DestinationError::StoreFailed("not initialized".to_string()))?;

        let seq = self.store_count.fetch_add(1, Ordering::Relaxed);
        let key = Self::object_key(&settings.prefix, seq, &audio.mime_type);
        let path = settings.dir.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DestinationError::StoreFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, &audio.bytes)
            .await
            .map_err(|e| DestinationError::StoreFailed(e.to_string()))?;

        tracing::info!(
            key = %key,
            mime = %audio.mime_type,
            bytes = audio.bytes.len(),
            "audio stored"
        );
        Ok(format!("file://{}", path.display()))
    }

    fn is_healthy(&self) -> bool {
        self.settings.lock().unwrap().is_some()
    }

    async fn shutdown(&self) -> Result<(), DestinationError> {
        Ok(())
    }
}
