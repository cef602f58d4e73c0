use crate::collector::{ChunkCollector, CollectedAudio};
use crate::mime::{is_raw_pcm, parse_mime_type};
use crate::source::ChunkSource;
use crate::wav::encode_wav;
use storyvox_core::{AudioError, EncodedAudio, DEFAULT_PCM_MIME_TYPE, WAV_MIME_TYPE};

/// Turns a streamed text-to-speech response into a playable audio blob.
///
/// Raw PCM streams are wrapped in a WAV container; anything else is passed
/// through with its original MIME type. One call handles one stream.
#[derive(Debug, Clone)]
pub struct AudioEncoder {
    default_mime_type: String,
}

impl AudioEncoder {
    pub fn new() -> Self {
        Self::with_default_mime(DEFAULT_PCM_MIME_TYPE)
    }

    /// Use `mime` for streams whose records never report a MIME type.
    pub fn with_default_mime(mime: &str) -> Self {
        Self {
            default_mime_type: mime.to_string(),
        }
    }

    pub fn default_mime_type(&self) -> &str {
        &self.default_mime_type
    }

    /// Drain `source` completely, then encode what it produced.
    pub async fn capture<S>(&self, source: &mut S) -> Result<EncodedAudio, AudioError>
    where
        S: ChunkSource + ?Sized,
    {
        let mut collector = ChunkCollector::new();
        while let Some(record) = source.next_chunk().await? {
            collector.push(record)?;
        }
        let collected = collector.finish(&self.default_mime_type)?;
        self.encode(collected)
    }

    pub fn encode(&self, collected: CollectedAudio) -> Result<EncodedAudio, AudioError> {
        if !is_raw_pcm(&collected.mime_type) {
            tracing::info!(
                mime = %collected.mime_type,
                bytes = collected.pcm.len(),
                "audio already in a playable format, passing through"
            );
            return Ok(EncodedAudio {
                bytes: collected.pcm,
                mime_type: collected.mime_type,
            });
        }

        let desc = parse_mime_type(&collected.mime_type);
        tracing::info!(
            sample_rate = desc.sample_rate_hz,
            bits = desc.bits_per_sample,
            channels = desc.channel_count,
            "converting PCM to WAV"
        );
        let bytes = encode_wav(&collected.pcm, &desc)?;

        Ok(EncodedAudio {
            bytes,
            mime_type: WAV_MIME_TYPE.to_string(),
        })
    }
}

impl Default for AudioEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;
    use crate::wav::{WavHeader, HEADER_LEN};
    use storyvox_core::InlineAudio;

    fn collected(mime: &str, pcm: Vec<u8>) -> CollectedAudio {
        CollectedAudio {
            pcm,
            mime_type: mime.to_string(),
            chunk_count: 1,
        }
    }

    #[test]
    fn test_encode_wraps_pcm() {
        let encoder = AudioEncoder::new();
        let out = encoder
            .encode(collected("audio/l16;codec=pcm;rate=16000", vec![7; 10]))
            .unwrap();
        assert_eq!(out.mime_type, "audio/wav");
        assert_eq!(out.len(), HEADER_LEN + 10);
        let header = WavHeader::parse(&out.bytes).unwrap();
        assert_eq!(header.sample_rate_hz, 16000);
        assert_eq!(header.data_size, 10);
    }

    #[test]
    fn test_encode_passes_through_compressed() {
        let encoder = AudioEncoder::new();
        let payload = vec![0xFF, 0xFB, 0x90, 0x00];
        let out = encoder
            .encode(collected("audio/mpeg", payload.clone()))
            .unwrap();
        assert_eq!(out.mime_type, "audio/mpeg");
        assert_eq!(out.bytes, payload);
    }

    #[test]
    fn test_encode_uppercase_l16_is_wrapped() {
        let out = AudioEncoder::new()
            .encode(collected("audio/L16;rate=8000", vec![0; 4]))
            .unwrap();
        assert_eq!(out.mime_type, "audio/wav");
        assert_eq!(WavHeader::parse(&out.bytes).unwrap().sample_rate_hz, 8000);
    }

    #[tokio::test]
    async fn test_capture_without_mime_uses_configured_default() {
        let encoder = AudioEncoder::with_default_mime("audio/l16;codec=pcm;rate=22050");
        assert_eq!(encoder.default_mime_type(), "audio/l16;codec=pcm;rate=22050");
        let mut source = IterSource::new(vec![InlineAudio::new(None, "AQI=")]);
        let out = encoder.capture(&mut source).await.unwrap();
        assert_eq!(out.mime_type, "audio/wav");
        assert_eq!(WavHeader::parse(&out.bytes).unwrap().sample_rate_hz, 22050);
    }

    #[tokio::test]
    async fn test_capture_empty_stream_fails() {
        let mut source = IterSource::new(Vec::<InlineAudio>::new());
        let result = AudioEncoder::new().capture(&mut source).await;
        assert!(matches!(result, Err(AudioError::NoAudioProduced)));
    }

    #[tokio::test]
    async fn test_capture_decode_failure_aborts() {
        let mut source = IterSource::new(vec![
            InlineAudio::new(Some("audio/l16"), "AQI="),
            InlineAudio::new(None, "@@@@"),
            InlineAudio::new(None, "AwQ="),
        ]);
        let result = AudioEncoder::new().capture(&mut source).await;
        assert!(matches!(
            result,
            Err(AudioError::DecodeFailed { index: 1, .. })
        ));
    }
}
