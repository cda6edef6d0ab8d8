//! Crunch archive introspection and level unpacking.
//!
//! # Dialects
//! Two structurally identical archive dialects exist: standard crunch and
//! the engine-specific "unity crunch" rewrite, which shares the header
//! layout but swaps the internal transform and adds ETC payload formats.
//! [`CrunchVariant`] selects the dialect; every operation takes it
//! explicitly, nothing is auto-detected.
//!
//! # Ownership protocol
//! [`unpack_level`] returns either a fully valid, exactly sized owned
//! buffer or a typed error.  There is no partially written output and no
//! alias retained inside the crate, so the caller may free or mutate the
//! result without coordination.
//!
//! # Reachable levels
//! The external transform exposes its output at the decoded-pixel boundary
//! and only for the archive's top level.  Deeper indices are still
//! range-checked against the header so misuse reports precisely; see
//! [`UnpackError::LevelNotSupported`].

use std::panic::{self, AssertUnwindSafe};

use texture2ddecoder::{decode_crunch, decode_unity_crunch, CrnTextureInfo};
use thiserror::Error;

use crate::format::TextureFormat;
use crate::image::{rgba_len, swap_red_blue, words_to_bytes, CanonicalImage};

// ── Frozen payload tag codes ─────────────────────────────────────────────────
//
// The crn_format enumeration as written into archive headers.  These values
// are fixed by the on-disk format and never renumbered.  The decoder crate
// keeps its own enum private, so the raw codes are matched here.

const CRN_FMT_DXT1:      u32 = 0;
const CRN_FMT_DXT5:      u32 = 2;
const CRN_FMT_DXT5_CCXY: u32 = 3;
const CRN_FMT_DXT5_XGXR: u32 = 4;
const CRN_FMT_DXT5_XGBR: u32 = 5;
const CRN_FMT_DXT5_AGBR: u32 = 6;
const CRN_FMT_DXN_XY:    u32 = 7;
const CRN_FMT_DXN_YX:    u32 = 8;
const CRN_FMT_DXT5A:     u32 = 9;
const CRN_FMT_ETC1:      u32 = 10;
const CRN_FMT_ETC2:      u32 = 11;
const CRN_FMT_ETC2A:     u32 = 12;
const CRN_FMT_ETC1S:     u32 = 13;
const CRN_FMT_ETC2AS:    u32 = 14;

// ── Dialect selection ────────────────────────────────────────────────────────

/// Which crunch dialect an archive uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrunchVariant {
    Standard,
    Unity,
}

impl CrunchVariant {
    /// Human-readable name for diagnostics; never parsed back.
    pub fn name(self) -> &'static str {
        match self {
            CrunchVariant::Standard => "standard",
            CrunchVariant::Unity    => "unity",
        }
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum UnpackError {
    #[error("Archive is empty")]
    EmptyArchive,
    #[error("Archive header is invalid or truncated")]
    InvalidHeader,
    #[error("Archive declares {0} face(s), only single-face archives are supported")]
    UnsupportedFaces(u32),
    #[error("Level {level} is out of range for an archive declaring {levels} level(s)")]
    LevelOutOfRange { level: u32, levels: u32 },
    #[error("Level {0} is valid but unreachable, the transform unpacks the top level only")]
    LevelNotSupported(u32),
    #[error("The {variant} transform cannot serve this archive's payload format")]
    UnsupportedFormat { variant: &'static str },
    #[error("Requested {got_width}x{got_height} but the archive header declares {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, got_width: u32, got_height: u32 },
    #[error("Archive dimensions {width}x{height} overflow the address space")]
    Oversized { width: u32, height: u32 },
    #[error("Crunch transform failed: {0}")]
    TransformFailed(&'static str),
}

// ── Header introspection ─────────────────────────────────────────────────────

/// Metadata declared by a crunch archive header.
///
/// Parsed without unpacking anything; cheap enough to call per archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrunchInfo {
    /// Top-level (level 0) width in pixels.
    pub width: u32,
    /// Top-level (level 0) height in pixels.
    pub height: u32,
    /// Number of mip levels in the archive.
    pub levels: u32,
    /// Number of faces (6 for cubemaps; only 1 is unpackable).
    pub faces: u32,
    /// Encoded size of one block of the internal payload, in bytes.
    pub bytes_per_block: u32,
    /// Registry format the unpacked payload decodes as, when the selected
    /// dialect's transform can serve it.
    pub payload_format: Option<TextureFormat>,
}

impl CrunchInfo {
    /// Parses an archive header.
    ///
    /// Fails on empty input and on anything the header validator rejects
    /// (bad magic, truncation below the declared header size, corrupt
    /// fields).  Succeeds for multi-face archives so callers can inspect
    /// them, even though unpacking those is refused.
    pub fn parse(data: &[u8], variant: CrunchVariant) -> Result<Self, UnpackError> {
        if data.is_empty() {
            return Err(UnpackError::EmptyArchive);
        }
        let mut raw = CrnTextureInfo::default();
        if !raw.crnd_get_texture_info(data, data.len() as u32) {
            return Err(UnpackError::InvalidHeader);
        }
        let tag_code = raw.format as u32;
        Ok(Self {
            width: raw.width,
            height: raw.height,
            levels: raw.levels,
            faces: raw.faces,
            bytes_per_block: raw.bytes_per_block,
            payload_format: map_payload_format(tag_code, variant),
        })
    }

    /// Pixel dimensions of a given level, by the halving rule.
    ///
    /// Purely arithmetic: works for any index, including levels the
    /// transform cannot reach.
    pub fn level_dimensions(&self, level: u32) -> (u32, u32) {
        let w = self.width.checked_shr(level).unwrap_or(0).max(1);
        let h = self.height.checked_shr(level).unwrap_or(0).max(1);
        (w, h)
    }
}

/// Maps a header payload tag code to the registry format the dialect's
/// transform decodes it as.  Mirrors the transform's own dispatch: ETC tags
/// are serveable only by the unity dialect, and DXT3 (code 1) by neither
/// (crunch never writes it).
fn map_payload_format(code: u32, variant: CrunchVariant) -> Option<TextureFormat> {
    let unity = variant == CrunchVariant::Unity;
    match code {
        CRN_FMT_DXT1 => Some(TextureFormat::Bc1),
        CRN_FMT_DXT5
        | CRN_FMT_DXT5_CCXY
        | CRN_FMT_DXT5_XGXR
        | CRN_FMT_DXT5_XGBR
        | CRN_FMT_DXT5_AGBR => Some(TextureFormat::Bc3),
        CRN_FMT_DXT5A => Some(TextureFormat::Bc4),
        CRN_FMT_DXN_XY | CRN_FMT_DXN_YX => Some(TextureFormat::Bc5),
        CRN_FMT_ETC1 | CRN_FMT_ETC1S if unity => Some(TextureFormat::Etc1),
        CRN_FMT_ETC2 if unity => Some(TextureFormat::Etc2),
        CRN_FMT_ETC2A | CRN_FMT_ETC2AS if unity => Some(TextureFormat::Etc2A8),
        _ => None,
    }
}

// ── Level unpacking ──────────────────────────────────────────────────────────

/// One unpacked archive level: exactly sized, caller-owned RGBA payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedLevel {
    pub width: u32,
    pub height: u32,
    /// Canonical RGBA8888 bytes, length `width * height * 4`.
    pub data: Vec<u8>,
}

impl UnpackedLevel {
    /// Converts into a [`CanonicalImage`] without copying.
    pub fn into_image(self) -> CanonicalImage {
        CanonicalImage::from_parts(self.width, self.height, self.data)
    }
}

/// Unpacks one level of a crunch archive.
///
/// The header is parsed and validated first; `level_index` is range-checked
/// against the declared level count before anything is allocated.  On any
/// failure no buffer is produced.
pub fn unpack_level(
    data: &[u8],
    level_index: u32,
    variant: CrunchVariant,
) -> Result<UnpackedLevel, UnpackError> {
    let info = CrunchInfo::parse(data, variant)?;
    if level_index >= info.levels {
        return Err(UnpackError::LevelOutOfRange {
            level: level_index,
            levels: info.levels,
        });
    }
    if level_index != 0 {
        return Err(UnpackError::LevelNotSupported(level_index));
    }
    let words = decode_words(data, info.width, info.height, variant)?;
    let mut pixels = words_to_bytes(&words);
    swap_red_blue(&mut pixels);
    Ok(UnpackedLevel {
        width: info.width,
        height: info.height,
        data: pixels,
    })
}

/// Unpacks the top level of a standard crunch archive.
pub fn unpack_crunch(data: &[u8]) -> Result<UnpackedLevel, UnpackError> {
    unpack_level(data, 0, CrunchVariant::Standard)
}

/// Unpacks the top level of a unity crunch archive.
pub fn unpack_unity_crunch(data: &[u8]) -> Result<UnpackedLevel, UnpackError> {
    unpack_level(data, 0, CrunchVariant::Unity)
}

/// Runs the dialect's transform into a freshly allocated word buffer.
///
/// Caller dimensions must match the archive header exactly; the transform
/// fills the buffer by position, so a mismatch would silently misplace
/// pixels rather than fail.
pub(crate) fn decode_words(
    data: &[u8],
    width: u32,
    height: u32,
    variant: CrunchVariant,
) -> Result<Vec<u32>, UnpackError> {
    let info = CrunchInfo::parse(data, variant)?;
    if info.faces != 1 {
        return Err(UnpackError::UnsupportedFaces(info.faces));
    }
    if info.payload_format.is_none() {
        return Err(UnpackError::UnsupportedFormat { variant: variant.name() });
    }
    if (width, height) != (info.width, info.height) {
        return Err(UnpackError::DimensionMismatch {
            width: info.width,
            height: info.height,
            got_width: width,
            got_height: height,
        });
    }
    let byte_len = rgba_len(width, height)
        .ok_or(UnpackError::Oversized { width, height })?;
    let mut words = vec![0u32; byte_len / 4];
    // The transform can panic on archives whose bodies contradict the
    // header it already accepted; a caught unwind discards the buffer
    // and reports like any transform error.
    let result = panic::catch_unwind(AssertUnwindSafe(|| match variant {
        CrunchVariant::Standard => decode_crunch(data, width as usize, height as usize, &mut words),
        CrunchVariant::Unity => {
            decode_unity_crunch(data, width as usize, height as usize, &mut words)
        }
    }))
    .unwrap_or(Err("crunch transform panicked on malformed input"));
    result.map_err(UnpackError::TransformFailed)?;
    Ok(words)
}
