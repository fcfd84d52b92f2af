//! Canonical mono 16-bit PCM WAV container
//!
//! The container is the playable artifact handed back to the embedding
//! application: a fixed 44-byte RIFF/WAVE header followed by little-endian
//! signed 16-bit samples. The byte layout is stable — downstream consumers
//! store and replay these bytes directly — so the quantization rule
//! (clamp to [-1, 1], scale negatives by 32768 and non-negatives by 32767)
//! must not change.

use crate::types::SignalBuffer;

/// Size of the canonical RIFF/WAVE header in bytes
pub const HEADER_LEN: usize = 44;

/// Size of the fmt chunk body for plain PCM
const FMT_CHUNK_LEN: u32 = 16;

/// WAVE format tag for integer PCM
const FORMAT_PCM: u16 = 1;

/// Quantize a normalized sample to signed 16-bit
///
/// Asymmetric scaling uses the full signed range on both sides without
/// overflowing: -1.0 maps to -32768 and 1.0 maps to 32767.
pub(crate) fn sample_to_i16(s: f32) -> i16 {
    let s = s.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// An encoded mono 16-bit PCM WAV payload
///
/// Immutable once produced. `data_size == 2 * sample_count` and
/// `riff_size == 36 + data_size` hold by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmContainer {
    sample_rate: u32,
    sample_count: usize,
    bytes: Vec<u8>,
}

impl PcmContainer {
    /// Encode normalized samples into a playable WAV container
    pub fn encode(samples: &[f32], sample_rate: u32) -> Self {
        let data_size = (samples.len() * 2) as u32;
        let mut bytes = Vec::with_capacity(HEADER_LEN + data_size as usize);

        // RIFF header
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");

        // fmt chunk: PCM, mono, 16-bit
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        bytes.extend_from_slice(&FORMAT_PCM.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // channels
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
        bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

        // data chunk
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            bytes.extend_from_slice(&sample_to_i16(s).to_le_bytes());
        }

        Self {
            sample_rate,
            sample_count: samples.len(),
            bytes,
        }
    }

    /// Encode a signal buffer
    pub fn from_buffer(buffer: &SignalBuffer) -> Self {
        Self::encode(buffer.samples(), buffer.sample_rate())
    }

    /// Sample rate declared in the header
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of encoded samples
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Size of the sample payload in bytes
    pub fn data_size(&self) -> u32 {
        (self.sample_count * 2) as u32
    }

    /// RIFF chunk size field (total file size minus the 8-byte RIFF intro)
    pub fn riff_size(&self) -> u32 {
        36 + self.data_size()
    }

    /// The complete container: header plus payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the container, yielding its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_header_and_payload_bytes() {
        // encode([1.0, -1.0, 0.0], 8000): riff_size 42, data_size 6,
        // payload 0x7FFF, 0x8000, 0x0000 little-endian
        let container = PcmContainer::encode(&[1.0, -1.0, 0.0], 8000);

        assert_eq!(container.riff_size(), 42);
        assert_eq!(container.data_size(), 6);
        assert_eq!(container.as_bytes().len(), HEADER_LEN + 6);

        let bytes = container.as_bytes();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 42);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1); // PCM
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 1); // mono
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 8000);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 16000);
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 6);

        assert_eq!(&bytes[44..46], &[0xFF, 0x7F]); // 1.0 -> 0x7FFF
        assert_eq!(&bytes[46..48], &[0x00, 0x80]); // -1.0 -> 0x8000 (i.e. -32768)
        assert_eq!(&bytes[48..50], &[0x00, 0x00]); // 0.0 -> 0x0000
    }

    #[test]
    fn test_sample_quantization_clamps_out_of_range() {
        assert_eq!(sample_to_i16(2.0), i16::MAX);
        assert_eq!(sample_to_i16(-2.0), i16::MIN);
        assert_eq!(sample_to_i16(0.5), 16383);
        assert_eq!(sample_to_i16(-0.5), -16384);
    }

    #[test]
    fn test_empty_signal_encodes_header_only() {
        let container = PcmContainer::encode(&[], 44_100);
        assert_eq!(container.data_size(), 0);
        assert_eq!(container.riff_size(), 36);
        assert_eq!(container.as_bytes().len(), HEADER_LEN);
    }

    #[test]
    fn test_hound_reads_container_back() {
        // Cross-check the hand-written header against hound's reader
        let samples = vec![0.5f32, -0.25, 0.125, -1.0];
        let container = PcmContainer::encode(&samples, 12_000);

        let mut reader =
            hound::WavReader::new(std::io::Cursor::new(container.into_bytes())).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 12_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        let expected: Vec<i16> = samples.iter().map(|&s| sample_to_i16(s)).collect();
        assert_eq!(read, expected);
    }
}
