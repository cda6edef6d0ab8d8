//! Format-dispatch decoding façade.
//!
//! # Contract
//! [`decode`] takes an opaque compressed payload plus a [`TextureFormat`]
//! tag and yields a [`CanonicalImage`] or a typed error.  The façade owns
//! validation (nonzero dimensions, address-space representability, ASTC
//! footprint, per-format minimum encoded length, crunch header agreement)
//! and forwards the block math to the external decoders; it performs no
//! pixel arithmetic of its own.  The backends are not total over
//! malformed bit patterns; the dispatch site catches their panics and
//! surfaces them as [`DecodeError::DecoderFailed`].
//!
//! # Normalization
//! Backends emit B,G,R,A ordered words.  On success the serialized bytes
//! pass through [`swap_red_blue`] exactly once, gated by the per-format
//! flag.  A failed decode produces no buffer and is never normalized.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::crunch::{self, CrunchVariant, UnpackError};
use crate::format::{astc_footprint_valid, TextureFormat};
use crate::image::{rgba_len, swap_red_blue, words_to_bytes, CanonicalImage};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("No registered decoder supports {format}")]
    UnsupportedFormat { format: TextureFormat },
    #[error("Image dimensions must be nonzero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
    #[error("Image dimensions {width}x{height} overflow the address space")]
    Oversized { width: u32, height: u32 },
    #[error("Payload holds {actual} bytes, {format} needs at least {expected}")]
    TooShort { format: TextureFormat, expected: usize, actual: usize },
    #[error("Decoder failed: {0}")]
    DecoderFailed(&'static str),
    #[error("Crunch archive rejected: {0}")]
    Crunch(#[from] UnpackError),
}

/// Decodes a compressed texture payload into a canonical RGBA8888 image.
///
/// `width` and `height` are the pixel dimensions of the texture, not the
/// block grid; partial edge blocks are the decoder's concern.  For the
/// crunch archive formats the dimensions must match the archive header
/// (archives are self-describing; see [`crate::crunch`] for header
/// introspection and level unpacking).
///
/// # Examples
///
/// ```no_run
/// use texport::{decode, TextureFormat};
///
/// let payload = std::fs::read("tile.bc1")?;
/// let image = decode(TextureFormat::Bc1, &payload, 256, 256)?;
/// assert_eq!(image.pixels().len(), 256 * 256 * 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(
    format: TextureFormat,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<CanonicalImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroDimensions { width, height });
    }
    if let TextureFormat::Astc { block_width, block_height } = format {
        if !astc_footprint_valid(block_width, block_height) {
            return Err(DecodeError::UnsupportedFormat { format });
        }
    }
    let byte_len = rgba_len(width, height).ok_or(DecodeError::Oversized { width, height })?;
    if let Some(expected) = format.encoded_len(width, height) {
        if data.len() < expected {
            return Err(DecodeError::TooShort {
                format,
                expected,
                actual: data.len(),
            });
        }
    }

    let words = match format {
        TextureFormat::Crunch => {
            crunch::decode_words(data, width, height, CrunchVariant::Standard)?
        }
        TextureFormat::UnityCrunch => {
            crunch::decode_words(data, width, height, CrunchVariant::Unity)?
        }
        _ => {
            let mut words = vec![0u32; byte_len / 4];
            // The backends index by bit offsets taken straight from the
            // payload and can panic on garbage; a caught unwind discards
            // the half-written buffer and reports like any decode error.
            panic::catch_unwind(AssertUnwindSafe(|| {
                run_decoder(format, data, width as usize, height as usize, &mut words)
            }))
            .unwrap_or(Err("decoder panicked on malformed input"))
            .map_err(DecodeError::DecoderFailed)?;
            words
        }
    };

    let mut pixels = words_to_bytes(&words);
    if format.emits_bgra() {
        swap_red_blue(&mut pixels);
    }
    Ok(CanonicalImage::from_parts(width, height, pixels))
}

/// The registry table: forwards one block-format payload to its external
/// decoder.  Crunch tags never reach this table; [`decode`] routes them
/// through the archive path.
fn run_decoder(
    format: TextureFormat,
    data: &[u8],
    width: usize,
    height: usize,
    image: &mut [u32],
) -> Result<(), &'static str> {
    match format {
        TextureFormat::Bc1         => texture2ddecoder::decode_bc1(data, width, height, image),
        TextureFormat::Bc2         => texture2ddecoder::decode_bc2(data, width, height, image),
        TextureFormat::Bc3         => texture2ddecoder::decode_bc3(data, width, height, image),
        TextureFormat::Bc4         => texture2ddecoder::decode_bc4(data, width, height, image),
        TextureFormat::Bc5         => texture2ddecoder::decode_bc5(data, width, height, image),
        // BC6H unsigned; the asset pipeline stores UF16.
        TextureFormat::Bc6         => texture2ddecoder::decode_bc6(data, width, height, image, false),
        TextureFormat::Bc7         => texture2ddecoder::decode_bc7(data, width, height, image),
        TextureFormat::Etc1        => texture2ddecoder::decode_etc1(data, width, height, image),
        TextureFormat::Etc2        => texture2ddecoder::decode_etc2_rgb(data, width, height, image),
        TextureFormat::Etc2A1      => texture2ddecoder::decode_etc2_rgba1(data, width, height, image),
        TextureFormat::Etc2A8      => texture2ddecoder::decode_etc2_rgba8(data, width, height, image),
        TextureFormat::EacR        => texture2ddecoder::decode_eacr(data, width, height, image),
        TextureFormat::EacRSigned  => texture2ddecoder::decode_eacr_signed(data, width, height, image),
        TextureFormat::EacRg       => texture2ddecoder::decode_eacrg(data, width, height, image),
        TextureFormat::EacRgSigned => texture2ddecoder::decode_eacrg_signed(data, width, height, image),
        TextureFormat::Pvrtc2Bpp   => texture2ddecoder::decode_pvrtc_2bpp(data, width, height, image),
        TextureFormat::Pvrtc4Bpp   => texture2ddecoder::decode_pvrtc_4bpp(data, width, height, image),
        TextureFormat::AtcRgb4     => texture2ddecoder::decode_atc_rgb4(data, width, height, image),
        TextureFormat::AtcRgba8    => texture2ddecoder::decode_atc_rgba8(data, width, height, image),
        TextureFormat::Astc { block_width, block_height } => texture2ddecoder::decode_astc(
            data,
            width,
            height,
            block_width as usize,
            block_height as usize,
            image,
        ),
        TextureFormat::Crunch | TextureFormat::UnityCrunch => {
            Err("crunch archives take the archive path")
        }
    }
}
