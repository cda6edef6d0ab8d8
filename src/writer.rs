//! Growable binary writer for container assembly.
//!
//! # Append model
//! [`ByteWriter`] is an append-only byte buffer: raw spans, fixed-width
//! primitives, and character spans go in at the end; nothing is ever
//! rewritten in place.  Fields whose value depends on bytes written after
//! them (the RIFF file-size field) are computed by the caller up front.
//!
//! # Finalization
//! [`ByteWriter::finish`] consumes the writer and transfers the accumulated
//! bytes to the caller.  Ownership moves out, so the returned buffer can
//! never alias a writer that keeps growing.
//!
//! # Endianness
//! Numeric appends are strictly little-endian, matching RIFF.  Encoders for
//! big-endian fields (PNG packs its own) stream raw bytes through the
//! [`std::io::Write`] impl instead.

use std::io;

/// Append-only growable byte buffer.
///
/// Backs every container encoder in this crate: WAV fields go through the
/// typed appends, and the PNG serializer streams through the
/// [`std::io::Write`] impl.  Writes to the in-memory buffer cannot fail.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with `capacity` bytes pre-reserved.
    ///
    /// Growth past the reservation is handled transparently; the capacity is
    /// only a hint for callers that know the payload size up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity) }
    }

    /// Number of bytes appended so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View of the accumulated bytes without finalizing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Appends a raw byte span verbatim.
    #[inline]
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends a string byte-for-byte.  No terminator is added.
    #[inline]
    pub fn put_chars(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn put_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Appends a `u16` in little-endian order.
    #[inline]
    pub fn put_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Appends a `u32` in little-endian order.
    #[inline]
    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Consumes the writer and returns the accumulated bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl io::Write for ByteWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn appends_concatenate_in_order() {
        let mut w = ByteWriter::new();
        w.put_chars("RIFF");
        w.put_u32(0xDDCCBBAA);
        w.put_bytes(&[1, 2, 3]);
        w.put_u16(0x2211);
        w.put_u8(0xFF);
        assert_eq!(w.len(), 4 + 4 + 3 + 2 + 1);
        assert_eq!(
            w.finish(),
            vec![b'R', b'I', b'F', b'F', 0xAA, 0xBB, 0xCC, 0xDD, 1, 2, 3, 0x11, 0x22, 0xFF]
        );
    }

    #[test]
    fn io_write_seam_appends_everything() {
        let mut w = ByteWriter::with_capacity(8);
        w.put_bytes(b"ab");
        let n = w.write(b"cdef").unwrap();
        assert_eq!(n, 4);
        w.flush().unwrap();
        assert_eq!(w.as_slice(), b"abcdef");
    }

    #[test]
    fn chars_are_raw_bytes_without_terminator() {
        let mut w = ByteWriter::new();
        w.put_chars("fmt ");
        assert_eq!(w.finish(), b"fmt ".to_vec());
    }
}
