//! WAV container assembly.
//!
//! Wraps a raw sample payload in a complete RIFF/WAVE file: every fmt
//! sub-chunk field plus the data sub-chunk, assembled over [`ByteWriter`].
//! The payload is copied verbatim; no resampling or sample conversion.

use crate::writer::ByteWriter;

/// Sample encoding declared in a WAV fmt chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    Pcm8,
    Pcm16,
    Pcm24,
    Pcm32,
    Float32,
    Float64,
    ImaAdpcm,
}

impl WavFormat {
    /// RIFF format-code field: 1 integer PCM, 3 IEEE float, 17 IMA ADPCM.
    pub fn format_code(self) -> u16 {
        match self {
            WavFormat::Pcm8
            | WavFormat::Pcm16
            | WavFormat::Pcm24
            | WavFormat::Pcm32 => 1,
            WavFormat::Float32 | WavFormat::Float64 => 3,
            WavFormat::ImaAdpcm => 17,
        }
    }

    /// Bits per sample as declared in the fmt chunk.
    ///
    /// IMA ADPCM declares its 4-bit nibble size, not a decoded width.
    pub fn bits_per_sample(self) -> u32 {
        match self {
            WavFormat::ImaAdpcm => 4,
            WavFormat::Pcm8     => 8,
            WavFormat::Pcm16    => 16,
            WavFormat::Pcm24    => 24,
            WavFormat::Pcm32    => 32,
            WavFormat::Float32  => 32,
            WavFormat::Float64  => 64,
        }
    }

    /// Maps an integer sample width in bytes (1 to 4) to its PCM format.
    pub fn from_sample_width(width: u32) -> Option<Self> {
        match width {
            1 => Some(WavFormat::Pcm8),
            2 => Some(WavFormat::Pcm16),
            3 => Some(WavFormat::Pcm24),
            4 => Some(WavFormat::Pcm32),
            _ => None,
        }
    }
}

/// Assembles a complete RIFF/WAVE file around `data`.
///
/// The RIFF size field counts everything after itself: `36 + n` for the
/// 16-byte fmt chunk, `40 + n` when IMA ADPCM extends the chunk to 20
/// bytes.
pub fn encode_wav(format: WavFormat, sample_rate: u32, channels: u16, data: &[u8]) -> Vec<u8> {
    let bits = format.bits_per_sample();
    let adpcm = format == WavFormat::ImaAdpcm;
    let fmt_size: u32 = if adpcm { 20 } else { 16 };

    let mut w = ByteWriter::with_capacity(28 + fmt_size as usize + data.len());
    w.put_chars("RIFF");
    w.put_u32(20 + fmt_size + data.len() as u32);
    w.put_chars("WAVE");

    w.put_chars("fmt ");
    w.put_u32(fmt_size);
    w.put_u16(format.format_code());
    w.put_u16(channels);
    w.put_u32(sample_rate);
    // Byte rate in u64: the product exceeds u32 for high rates at wide
    // sample formats, and the 32-bit field takes the truncated value.
    w.put_u32((sample_rate as u64 * bits as u64 * channels as u64 / 8) as u32);
    if adpcm {
        // Fixed compressed-block geometry: 1024-byte blocks of 1017 samples.
        w.put_u16(1024);
    } else {
        w.put_u16((channels as u32 * bits / 8) as u16);
    }
    w.put_u16(bits as u16);
    if adpcm {
        w.put_u16(2);
        w.put_u16(1017);
    }

    w.put_chars("data");
    w.put_u32(data.len() as u32);
    w.put_bytes(data);
    w.finish()
}

/// Wraps integer PCM given a sample width in bytes, the shape of the
/// original host export.  `None` when `sample_width` is not 1 to 4.
pub fn encode_pcm(
    channels: u16,
    frame_rate: u32,
    sample_width: u32,
    data: &[u8],
) -> Option<Vec<u8>> {
    let format = WavFormat::from_sample_width(sample_width)?;
    Some(encode_wav(format, frame_rate, channels, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(b: &[u8], i: usize) -> u16 {
        u16::from_le_bytes([b[i], b[i + 1]])
    }

    fn u32_at(b: &[u8], i: usize) -> u32 {
        u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]])
    }

    #[test]
    fn pcm16_header_layout() {
        let payload = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let wav = encode_wav(WavFormat::Pcm16, 44_100, 2, &payload);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + payload.len() as u32);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1); // integer PCM
        assert_eq!(u16_at(&wav, 22), 2);
        assert_eq!(u32_at(&wav, 24), 44_100);
        assert_eq!(u32_at(&wav, 28), 44_100 * 2 * 16 / 8);
        assert_eq!(u16_at(&wav, 32), 4); // block align
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), payload.len() as u32);
        assert_eq!(&wav[44..], &payload);
        assert_eq!(wav.len(), 44 + payload.len());
    }

    #[test]
    fn ima_adpcm_extends_fmt_chunk() {
        let payload = vec![0u8; 1024];
        let wav = encode_wav(WavFormat::ImaAdpcm, 22_050, 1, &payload);

        assert_eq!(u32_at(&wav, 4), 40 + payload.len() as u32);
        assert_eq!(u32_at(&wav, 16), 20);
        assert_eq!(u16_at(&wav, 20), 17);
        assert_eq!(u16_at(&wav, 32), 1024); // block align
        assert_eq!(u16_at(&wav, 34), 4); // nibbles
        assert_eq!(u16_at(&wav, 36), 2); // extra size
        assert_eq!(u16_at(&wav, 38), 1017); // samples per block
        assert_eq!(&wav[40..44], b"data");
    }

    #[test]
    fn float32_declares_ieee_format() {
        let wav = encode_wav(WavFormat::Float32, 48_000, 1, &[0; 4]);
        assert_eq!(u16_at(&wav, 20), 3);
        assert_eq!(u16_at(&wav, 34), 32);
    }

    #[test]
    fn byte_rate_tolerates_extreme_sample_rates() {
        // 100 MHz of mono Float64 is 800 MB/s, which fits the field even
        // though the intermediate rate*bits product does not fit in u32.
        let wav = encode_wav(WavFormat::Float64, 100_000_000, 1, &[]);
        assert_eq!(u32_at(&wav, 24), 100_000_000);
        assert_eq!(u32_at(&wav, 28), 800_000_000);

        // Past u32 the field wraps rather than refusing the rate.
        let wav = encode_wav(WavFormat::Pcm16, 4_000_000_000, 2, &[]);
        assert_eq!(u32_at(&wav, 24), 4_000_000_000);
        assert_eq!(u32_at(&wav, 28), 16_000_000_000u64 as u32);
    }

    #[test]
    fn sample_width_mapping() {
        assert_eq!(WavFormat::from_sample_width(2), Some(WavFormat::Pcm16));
        assert_eq!(WavFormat::from_sample_width(0), None);
        assert_eq!(WavFormat::from_sample_width(5), None);
        assert!(encode_pcm(2, 44_100, 7, &[]).is_none());
    }
}
