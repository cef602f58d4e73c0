/// MIME type assumed when the generation source never reports one.
///
/// Mirrors the upstream text-to-speech default (16-bit mono PCM at 24 kHz).
/// If the upstream default changes, this has to change with it.
pub const DEFAULT_PCM_MIME_TYPE: &str = "audio/l16;codec=pcm;rate=24000";

pub const WAV_MIME_TYPE: &str = "audio/wav";

/// One record of a streamed audio response, as delivered by the generation source.
///
/// `data` is base64, optionally preceded by a data-URL style `<metadata>,` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAudio {
    pub mime_type: Option<String>,
    pub data: String,
}

impl InlineAudio {
    pub fn new(mime_type: Option<&str>, data: &str) -> Self {
        Self {
            mime_type: mime_type.map(str::to_string),
            data: data.to_string(),
        }
    }
}

/// A finished audio blob, ready to be handed to a storage destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl EncodedAudio {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
