use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use storyvox_core::{AudioError, InlineAudio};

/// Standard alphabet; padding optional and non-zero trailing bits accepted on decode.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode one chunk payload, dropping any `<metadata>,` prefix first.
pub fn decode_chunk(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    };
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    LENIENT_BASE64.decode(compact)
}

/// Everything gathered from one audio stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedAudio {
    pub pcm: Vec<u8>,
    pub mime_type: String,
    pub chunk_count: usize,
}

/// Accumulates decoded chunks of a single stream in arrival order.
///
/// The MIME type is taken from the records seen before the first non-empty
/// chunk and is locked from then on.
pub struct ChunkCollector {
    buffer: Vec<u8>,
    mime_type: Option<String>,
    chunk_count: usize,
    records_seen: usize,
}

impl ChunkCollector {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            mime_type: None,
            chunk_count: 0,
            records_seen: 0,
        }
    }

    pub fn push(&mut self, record: InlineAudio) -> Result<(), AudioError> {
        let index = self.records_seen;
        self.records_seen += 1;

        if let Some(mime) = record.mime_type.filter(|m| !m.is_empty()) {
            if self.chunk_count == 0 {
                tracing::debug!(index, mime = %mime, "detected audio MIME type");
                self.mime_type = Some(mime);
            } else if self.mime_type.as_deref() != Some(mime.as_str()) {
                tracing::warn!(
                    index,
                    mime = %mime,
                    locked = ?self.mime_type,
                    "ignoring MIME change mid-stream"
                );
            }
        }

        let bytes = decode_chunk(&record.data).map_err(|e| AudioError::DecodeFailed {
            index,
            reason: e.to_string(),
        })?;

        if bytes.is_empty() {
            tracing::trace!(index, "skipping empty chunk");
            return Ok(());
        }

        self.buffer.extend_from_slice(&bytes);
        self.chunk_count += 1;
        tracing::trace!(
            index,
            chunk_bytes = bytes.len(),
            total_bytes = self.buffer.len(),
            "appended audio chunk"
        );
        Ok(())
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// Close the stream. `default_mime` is used when no record carried a MIME type.
    pub fn finish(self, default_mime: &str) -> Result<CollectedAudio, AudioError> {
        if self.chunk_count == 0 {
            return Err(AudioError::NoAudioProduced);
        }

        let mime_type = self.mime_type.unwrap_or_else(|| default_mime.to_string());
        tracing::info!(
            chunks = self.chunk_count,
            bytes = self.buffer.len(),
            mime = %mime_type,
            "collected audio stream"
        );

        Ok(CollectedAudio {
            pcm: self.buffer,
            mime_type,
            chunk_count: self.chunk_count,
        })
    }
}

impl Default for ChunkCollector {
    fn default() -> Self {
        Self::new()
    }
}
