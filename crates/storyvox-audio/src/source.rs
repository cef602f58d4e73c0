use async_trait::async_trait;
use storyvox_core::{AudioError, InlineAudio};
use tokio::sync::mpsc;

/// An ordered, finite stream of audio records from a generation backend.
///
/// `Ok(None)` marks the end of the stream. An `Err` aborts the capture.
#[async_trait]
pub trait ChunkSource: Send {
    async fn next_chunk(&mut self) -> Result<Option<InlineAudio>, AudioError>;
}

#[async_trait]
impl ChunkSource for mpsc::Receiver<Result<InlineAudio, AudioError>> {
    async fn next_chunk(&mut self) -> Result<Option<InlineAudio>, AudioError> {
        self.recv().await.transpose()
    }
}

#[async_trait]
impl ChunkSource for mpsc::UnboundedReceiver<Result<InlineAudio, AudioError>> {
    async fn next_chunk(&mut self) -> Result<Option<InlineAudio>, AudioError> {
        self.recv().await.transpose()
    }
}

/// Adapts an in-memory iterator of records into a [`ChunkSource`].
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = InlineAudio> + Send,
{
    pub fn new(inner: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: inner.into_iter(),
        }
    }
}

#[async_trait]
impl<I> ChunkSource for IterSource<I>
where
    I: Iterator<Item = InlineAudio> + Send,
{
    async fn next_chunk(&mut self) -> Result<Option<InlineAudio>, AudioError> {
        Ok(self.inner.next())
    }
}

/// Parse one line of a chunk file: `<mime>\t<data>` or bare `<data>`.
///
/// Blank lines and `#` comments yield `None`.
pub fn parse_chunk_line(line: &str) -> Option<InlineAudio> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    match line.split_once('\t') {
        Some((mime, data)) => {
            let mime = mime.trim();
            Some(InlineAudio {
                mime_type: (!mime.is_empty()).then(|| mime.to_string()),
                data: data.trim().to_string(),
            })
        }
        None => Some(InlineAudio {
            mime_type: None,
            data: trimmed.to_string(),
        }),
    }
}
