//! PNG container assembly.
//!
//! The external serializer streams straight into [`ByteWriter`] through its
//! [`std::io::Write`] seam, so the accumulated buffer IS the PNG file; the
//! encoder state is stack-local to each call.

use std::io;

use thiserror::Error;

use crate::image::CanonicalImage;
use crate::writer::ByteWriter;

#[derive(Error, Debug)]
pub enum PngError {
    #[error("PNG serialization failed: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// Encodes a canonical image as a complete PNG byte stream.
///
/// 8-bit RGBA, no interlacing, fast compression.  Zero-dimension images
/// yield an empty buffer rather than an error: PNG has no zero-size
/// representation and there is nothing to serialize.
pub fn encode_png(image: &CanonicalImage) -> Result<Vec<u8>, PngError> {
    if image.width() == 0 || image.height() == 0 {
        return Ok(Vec::new());
    }
    let mut sink = ByteWriter::new();
    encode_png_into(image, &mut sink)?;
    Ok(sink.finish())
}

/// Encodes into an arbitrary write sink.
///
/// The image must have nonzero dimensions; [`encode_png`] handles the
/// zero-size case before reaching here.
pub fn encode_png_into<W: io::Write>(image: &CanonicalImage, sink: W) -> Result<(), PngError> {
    let mut encoder = png::Encoder::new(sink, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.pixels())?;
    writer.finish()?;
    Ok(())
}
