//! Canonical pixel representation and channel-order normalization.
//!
//! Every decoder in the registry, whatever its native block layout, ends up
//! here: a [`CanonicalImage`] owns exactly `width * height` RGBA8888 pixels,
//! row-major, no padding.  The normalization primitive [`swap_red_blue`]
//! converts the decoders' legacy B,G,R,A byte order; it is its own inverse,
//! so applying it twice restores the input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    /// `width * height * 4` does not fit in memory on this target.
    #[error("Image dimensions {width}x{height} overflow the address space")]
    Oversized { width: u32, height: u32 },
    #[error("Pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    LengthMismatch { width: u32, height: u32, expected: usize, actual: usize },
}

/// Byte length of a `width` x `height` RGBA8888 buffer, if representable.
pub(crate) fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

/// Swaps bytes 0 and 2 of every 4-byte pixel in place.
///
/// Turns B,G,R,A into R,G,B,A (and back: the swap is an involution).
/// Bytes 1 and 3 are untouched.  An empty buffer is a no-op; trailing bytes
/// that do not fill a whole pixel are left as-is.
pub fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

/// Owned RGBA8888 image, row-major, stride `width * 4`, no padding.
///
/// Only fully populated buffers become a `CanonicalImage`; a failed decode
/// produces no image at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CanonicalImage {
    /// Wraps a caller-supplied RGBA buffer, checking the length invariant.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = rgba_len(width, height)
            .ok_or(ImageError::Oversized { width, height })?;
        if pixels.len() != expected {
            return Err(ImageError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Internal constructor for buffers whose length was already validated.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(Some(pixels.len()), rgba_len(width, height));
        Self { width, height, pixels }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes, length `width * height * 4`.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the image and returns the pixel bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Reverses the row order in place.
    ///
    /// Engine textures are commonly stored bottom-up; PNG is top-down.
    pub fn flip_vertical(&mut self) {
        let stride = self.width as usize * 4;
        if stride == 0 || self.height < 2 {
            return;
        }
        let mut top = 0usize;
        let mut bottom = self.height as usize - 1;
        while top < bottom {
            let (upper, lower) = self.pixels.split_at_mut(bottom * stride);
            upper[top * stride..top * stride + stride].swap_with_slice(&mut lower[..stride]);
            top += 1;
            bottom -= 1;
        }
    }
}

/// Serializes decoder output words to bytes in memory order.
///
/// Decoders emit one `u32` per pixel packed `0xAARRGGBB`; little-endian
/// serialization yields the B,G,R,A byte layout that [`swap_red_blue`]
/// normalizes.
pub(crate) fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 4);
    for px in words {
        out.extend_from_slice(&px.to_le_bytes());
    }
    out
}
