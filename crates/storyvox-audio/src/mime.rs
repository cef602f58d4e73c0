use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;
pub const PCM_BITS_PER_SAMPLE: u16 = 16;
pub const PCM_CHANNELS: u16 = 1;

/// Parameters of the raw PCM stream, fixed for the lifetime of one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub sample_rate_hz: u32,
    pub bits_per_sample: u16,
    pub channel_count: u16,
}

impl Default for StreamDescriptor {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
            bits_per_sample: PCM_BITS_PER_SAMPLE,
            channel_count: PCM_CHANNELS,
        }
    }
}

impl StreamDescriptor {
    /// Wraps on overflow, the same way a 32-bit header field would.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate_hz
            .wrapping_mul(u32::from(self.block_align()))
    }

    pub fn block_align(&self) -> u16 {
        self.channel_count * self.bits_per_sample / 8
    }
}

fn rate_pattern() -> &'static Regex {
    static RATE: OnceLock<Regex> = OnceLock::new();
    RATE.get_or_init(|| Regex::new(r"rate=(\d+)").unwrap())
}

/// Derive the stream descriptor from a MIME type such as `audio/l16;codec=pcm;rate=24000`.
///
/// Only the sample rate is read; the stream is always treated as 16-bit mono.
/// A missing or unparsable rate falls back to [`DEFAULT_SAMPLE_RATE`].
pub fn parse_mime_type(mime_type: &str) -> StreamDescriptor {
    let sample_rate_hz = rate_pattern()
        .captures(mime_type)
        .and_then(|cap| cap[1].parse::<u32>().ok())
        .unwrap_or(DEFAULT_SAMPLE_RATE);

    StreamDescriptor {
        sample_rate_hz,
        ..StreamDescriptor::default()
    }
}

/// Whether the MIME type names raw linear PCM that needs a WAV container.
pub fn is_raw_pcm(mime_type: &str) -> bool {
    let lower = mime_type.to_ascii_lowercase();
    lower.contains("l16") || lower.contains("pcm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_48000() {
        let desc = parse_mime_type("audio/l16;codec=pcm;rate=48000");
        assert_eq!(desc.sample_rate_hz, 48000);
        assert_eq!(desc.bits_per_sample, 16);
        assert_eq!(desc.channel_count, 1);
    }

    #[test]
    fn test_parse_is_stable_across_calls() {
        let first = parse_mime_type("audio/l16;codec=pcm;rate=48000");
        let second = parse_mime_type("audio/l16;codec=pcm;rate=48000");
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_missing_rate_defaults() {
        let desc = parse_mime_type("audio/l16;codec=pcm");
        assert_eq!(desc.sample_rate_hz, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_parse_overflowing_rate_defaults() {
        let desc = parse_mime_type("audio/l16;rate=99999999999999");
        assert_eq!(desc.sample_rate_hz, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_parse_non_numeric_rate_defaults() {
        let desc = parse_mime_type("audio/l16;rate=fast");
        assert_eq!(desc.sample_rate_hz, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_parse_ignores_declared_bit_depth_and_channels() {
        let desc = parse_mime_type("audio/l24;rate=16000;channels=2");
        assert_eq!(desc.sample_rate_hz, 16000);
        assert_eq!(desc.bits_per_sample, 16);
        assert_eq!(desc.channel_count, 1);
    }

    #[test]
    fn test_descriptor_derived_fields() {
        let desc = parse_mime_type("audio/l16;rate=16000");
        assert_eq!(desc.block_align(), 2);
        assert_eq!(desc.byte_rate(), 32000);
    }

    #[test]
    fn test_is_raw_pcm() {
        assert!(is_raw_pcm("audio/l16;codec=pcm;rate=24000"));
        assert!(is_raw_pcm("audio/L16;rate=24000"));
        assert!(is_raw_pcm("audio/PCM"));
        assert!(is_raw_pcm("audio/x-pcm"));
        assert!(!is_raw_pcm("audio/mpeg"));
        assert!(!is_raw_pcm("audio/wav"));
        assert!(!is_raw_pcm("audio/ogg"));
    }
}
