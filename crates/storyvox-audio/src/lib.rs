//! Capture of streamed text-to-speech audio into a single playable blob.
//!
//! A [`ChunkSource`] yields base64 records; the [`ChunkCollector`] decodes and
//! concatenates them; [`AudioEncoder`] wraps raw PCM in a WAV container.

pub mod collector;
pub mod encoder;
pub mod mime;
pub mod source;
pub mod wav;

pub use collector::{decode_chunk, ChunkCollector, CollectedAudio};
pub use encoder::AudioEncoder;
pub use mime::{is_raw_pcm, parse_mime_type, StreamDescriptor, DEFAULT_SAMPLE_RATE};
pub use source::{parse_chunk_line, ChunkSource, IterSource};
pub use wav::{encode_wav, WavHeader, HEADER_LEN};
