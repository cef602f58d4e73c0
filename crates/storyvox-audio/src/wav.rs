use crate::mime::StreamDescriptor;
use storyvox_core::AudioError;

pub const HEADER_LEN: usize = 44;

const RIFF_SIZE_OVERHEAD: u32 = 36;
const FMT_CHUNK_SIZE: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// The canonical 44-byte RIFF/WAVE header for uncompressed PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_size: u32,
    pub audio_format: u16,
    pub channel_count: u16,
    pub sample_rate_hz: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    /// Header for `data_len` bytes of PCM described by `desc`.
    ///
    /// Fails when the payload does not fit the 32-bit RIFF size fields.
    pub fn for_pcm(desc: &StreamDescriptor, data_len: usize) -> Result<Self, AudioError> {
        let data_size = u32::try_from(data_len)
            .ok()
            .filter(|n| *n <= u32::MAX - RIFF_SIZE_OVERHEAD)
            .ok_or(AudioError::PayloadTooLarge(data_len))?;

        Ok(Self {
            riff_size: RIFF_SIZE_OVERHEAD + data_size,
            audio_format: FORMAT_PCM,
            channel_count: desc.channel_count,
            sample_rate_hz: desc.sample_rate_hz,
            byte_rate: desc.byte_rate(),
            block_align: desc.block_align(),
            bits_per_sample: desc.bits_per_sample,
            data_size,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];

        // RIFF descriptor
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        // fmt subchunk
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        out[20..22].copy_from_slice(&self.audio_format.to_le_bytes());
        out[22..24].copy_from_slice(&self.channel_count.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate_hz.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        // data subchunk
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_size.to_le_bytes());

        out
    }

    /// Read a canonical header back from the start of a WAV file.
    pub fn parse(bytes: &[u8]) -> Result<Self, AudioError> {
        if bytes.len() < HEADER_LEN {
            return Err(AudioError::InvalidHeader(format!(
                "need {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        let fmt_size = read_u32(bytes, 16);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(AudioError::InvalidHeader(format!(
                "unexpected fmt chunk size {fmt_size}"
            )));
        }

        let audio_format = read_u16(bytes, 20);
        if audio_format != FORMAT_PCM {
            return Err(AudioError::InvalidHeader(format!(
                "unsupported audio format {audio_format}"
            )));
        }

        Ok(Self {
            riff_size: read_u32(bytes, 4),
            audio_format,
            channel_count: read_u16(bytes, 22),
            sample_rate_hz: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_size: read_u32(bytes, 40),
        })
    }
}

fn expect_tag(bytes: &[u8], at: usize, tag: &[u8; 4]) -> Result<(), AudioError> {
    if &bytes[at..at + 4] == tag {
        Ok(())
    } else {
        Err(AudioError::InvalidHeader(format!(
            "expected {:?} at offset {at}",
            String::from_utf8_lossy(tag)
        )))
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Prepend a WAV header to raw PCM. Output length is always `HEADER_LEN + pcm.len()`.
pub fn encode_wav(pcm: &[u8], desc: &StreamDescriptor) -> Result<Vec<u8>, AudioError> {
    let header = WavHeader::for_pcm(desc, pcm.len())?;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(pcm);

    tracing::debug!(
        sample_rate = desc.sample_rate_hz,
        pcm_bytes = pcm.len(),
        total_bytes = out.len(),
        "built WAV container"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::parse_mime_type;

    #[test]
    fn test_header_layout_is_byte_exact() {
        let desc = parse_mime_type("audio/l16;codec=pcm;rate=24000");
        let bytes = WavHeader::for_pcm(&desc, 100).unwrap().to_bytes();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[4..8], &136u32.to_le_bytes());
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(&bytes[16..20], &16u32.to_le_bytes());
        assert_eq!(&bytes[20..22], &1u16.to_le_bytes());
        assert_eq!(&bytes[22..24], &1u16.to_le_bytes());
        assert_eq!(&bytes[24..28], &24000u32.to_le_bytes());
        assert_eq!(&bytes[28..32], &48000u32.to_le_bytes());
        assert_eq!(&bytes[32..34], &2u16.to_le_bytes());
        assert_eq!(&bytes[34..36], &16u16.to_le_bytes());
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(&bytes[40..44], &100u32.to_le_bytes());
    }

    #[test]
    fn test_encode_wav_length_and_payload() {
        let desc = StreamDescriptor::default();
        let pcm: Vec<u8> = (0..10).collect();
        let wav = encode_wav(&pcm, &desc).unwrap();
        assert_eq!(wav.len(), HEADER_LEN + 10);
        assert_eq!(&wav[HEADER_LEN..], pcm.as_slice());
    }

    #[test]
    fn test_encode_wav_empty_payload_is_header_only() {
        let wav = encode_wav(&[], &StreamDescriptor::default()).unwrap();
        assert_eq!(wav.len(), HEADER_LEN);
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.riff_size, 36);
        assert_eq!(header.data_size, 0);
    }

    #[test]
    fn test_header_round_trip() {
        let desc = parse_mime_type("audio/l16;rate=44100");
        let wav = encode_wav(&[0u8; 882], &desc).unwrap();
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.sample_rate_hz, 44100);
        assert_eq!(header.channel_count, 1);
        assert_eq!(header.bits_per_sample, 16);
        assert_eq!(header.data_size, 882);
        assert_eq!(header.byte_rate, 88200);
        assert_eq!(header, WavHeader::for_pcm(&desc, 882).unwrap());
    }

    #[test]
    fn test_parse_rejects_short_input() {
        match WavHeader::parse(b"RIFF") {
            Err(AudioError::InvalidHeader(msg)) => assert!(msg.contains("44")),
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_wrong_tag() {
        let mut bytes = WavHeader::for_pcm(&StreamDescriptor::default(), 4)
            .unwrap()
            .to_bytes();
        bytes[8..12].copy_from_slice(b"AVI ");
        assert!(matches!(
            WavHeader::parse(&bytes),
            Err(AudioError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_pcm_format() {
        let mut bytes = WavHeader::for_pcm(&StreamDescriptor::default(), 4)
            .unwrap()
            .to_bytes();
        bytes[20..22].copy_from_slice(&3u16.to_le_bytes());
        assert!(matches!(
            WavHeader::parse(&bytes),
            Err(AudioError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_payload_too_large() {
        let too_big = (u32::MAX - 35) as usize;
        match WavHeader::for_pcm(&StreamDescriptor::default(), too_big) {
            Err(AudioError::PayloadTooLarge(n)) => assert_eq!(n, too_big),
            other => panic!("expected PayloadTooLarge, got {other:?}"),
        }
        let max_ok = (u32::MAX - 36) as usize;
        let header = WavHeader::for_pcm(&StreamDescriptor::default(), max_ok).unwrap();
        assert_eq!(header.riff_size, u32::MAX);
    }
}
