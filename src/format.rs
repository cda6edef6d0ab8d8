//! Texture format tags: the closed set of payload encodings the decode
//! façade accepts, with per-format block geometry and CLI-facing names.

use std::fmt;

/// ASTC block footprints defined by the LDR profile.
///
/// The decoder indexes per-block lookup tables by footprint, so anything
/// outside this set is rejected up front instead of being forwarded.
const ASTC_FOOTPRINTS: [(u8, u8); 14] = [
    (4, 4), (5, 4), (5, 5), (6, 5), (6, 6), (8, 5), (8, 6),
    (8, 8), (10, 5), (10, 6), (10, 8), (10, 10), (12, 10), (12, 12),
];

/// Returns whether `block_width` x `block_height` is a defined ASTC footprint.
pub fn astc_footprint_valid(block_width: u8, block_height: u8) -> bool {
    ASTC_FOOTPRINTS.contains(&(block_width, block_height))
}

/// Compressed payload encoding tag.
///
/// A closed enumeration: the set of GPU texture encodings is finite and
/// versioned, so there is no dynamic registration.  Parameterized encodings
/// carry their parameters in the variant (`Astc` block footprint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6,
    Bc7,
    Etc1,
    Etc2,
    Etc2A1,
    Etc2A8,
    EacR,
    EacRSigned,
    EacRg,
    EacRgSigned,
    Pvrtc2Bpp,
    Pvrtc4Bpp,
    AtcRgb4,
    AtcRgba8,
    /// ASTC with an explicit block footprint (see [`astc_footprint_valid`]).
    Astc { block_width: u8, block_height: u8 },
    /// Standard crunch archive (self-describing container, not fixed blocks).
    Crunch,
    /// Engine-specific crunch dialect with a modified internal transform.
    UnityCrunch,
}

impl TextureFormat {
    /// Canonical names accepted by [`TextureFormat::from_name`], for CLI
    /// listings.  ASTC appears with the square footprints; rectangular ones
    /// parse the same way (`astc-10x5`).
    pub const NAMES: &'static [&'static str] = &[
        "bc1", "bc2", "bc3", "bc4", "bc5", "bc6", "bc7",
        "etc1", "etc2", "etc2a1", "etc2a8",
        "eac-r", "eac-r-signed", "eac-rg", "eac-rg-signed",
        "pvrtc-2bpp", "pvrtc-4bpp",
        "atc-rgb4", "atc-rgba8",
        "astc-4x4", "astc-5x5", "astc-6x6", "astc-8x8", "astc-10x10", "astc-12x12",
        "crunch", "unity-crunch",
    ];

    /// Parse from a CLI string.
    ///
    /// Accepts the canonical names plus the legacy DXT aliases
    /// (`dxt1`/`dxt3`/`dxt5`).  Returns `None` for anything unrecognized,
    /// including ASTC footprints the encoding does not define.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        if let Some(dims) = s.strip_prefix("astc-") {
            let (w, h) = dims.split_once('x')?;
            let block_width: u8 = w.parse().ok()?;
            let block_height: u8 = h.parse().ok()?;
            if !astc_footprint_valid(block_width, block_height) {
                return None;
            }
            return Some(TextureFormat::Astc { block_width, block_height });
        }
        match s.as_str() {
            "bc1" | "dxt1"  => Some(TextureFormat::Bc1),
            "bc2" | "dxt3"  => Some(TextureFormat::Bc2),
            "bc3" | "dxt5"  => Some(TextureFormat::Bc3),
            "bc4"           => Some(TextureFormat::Bc4),
            "bc5"           => Some(TextureFormat::Bc5),
            "bc6"           => Some(TextureFormat::Bc6),
            "bc7"           => Some(TextureFormat::Bc7),
            "etc1"          => Some(TextureFormat::Etc1),
            "etc2"          => Some(TextureFormat::Etc2),
            "etc2a1"        => Some(TextureFormat::Etc2A1),
            "etc2a8"        => Some(TextureFormat::Etc2A8),
            "eac-r"         => Some(TextureFormat::EacR),
            "eac-r-signed"  => Some(TextureFormat::EacRSigned),
            "eac-rg"        => Some(TextureFormat::EacRg),
            "eac-rg-signed" => Some(TextureFormat::EacRgSigned),
            "pvrtc-2bpp"    => Some(TextureFormat::Pvrtc2Bpp),
            "pvrtc-4bpp"    => Some(TextureFormat::Pvrtc4Bpp),
            "atc-rgb4"      => Some(TextureFormat::AtcRgb4),
            "atc-rgba8"     => Some(TextureFormat::AtcRgba8),
            "crunch"        => Some(TextureFormat::Crunch),
            "unity-crunch"  => Some(TextureFormat::UnityCrunch),
            _               => None,
        }
    }

    /// Pixel footprint of one compressed block, `(width, height)`.
    ///
    /// `None` for the crunch variants: those are self-describing archives,
    /// not fixed-block payloads.
    pub fn block_dims(self) -> Option<(u32, u32)> {
        match self {
            TextureFormat::Pvrtc2Bpp => Some((8, 4)),
            TextureFormat::Astc { block_width, block_height } => {
                Some((block_width as u32, block_height as u32))
            }
            TextureFormat::Crunch | TextureFormat::UnityCrunch => None,
            _ => Some((4, 4)),
        }
    }

    /// Encoded size of one block in bytes.
    pub fn bytes_per_block(self) -> Option<usize> {
        match self {
            TextureFormat::Bc1
            | TextureFormat::Bc4
            | TextureFormat::Etc1
            | TextureFormat::Etc2
            | TextureFormat::Etc2A1
            | TextureFormat::EacR
            | TextureFormat::EacRSigned
            | TextureFormat::Pvrtc2Bpp
            | TextureFormat::Pvrtc4Bpp
            | TextureFormat::AtcRgb4 => Some(8),
            TextureFormat::Bc2
            | TextureFormat::Bc3
            | TextureFormat::Bc5
            | TextureFormat::Bc6
            | TextureFormat::Bc7
            | TextureFormat::Etc2A8
            | TextureFormat::EacRg
            | TextureFormat::EacRgSigned
            | TextureFormat::AtcRgba8
            | TextureFormat::Astc { .. } => Some(16),
            TextureFormat::Crunch | TextureFormat::UnityCrunch => None,
        }
    }

    /// Total encoded length of a `width` x `height` payload in this format.
    ///
    /// Partial blocks at the right/bottom edges round up to whole blocks.
    /// `None` when the length cannot be derived from dimensions alone
    /// (crunch archives carry their own header).
    pub fn encoded_len(self, width: u32, height: u32) -> Option<usize> {
        let (bw, bh) = self.block_dims()?;
        let blocks_x = (width as usize + bw as usize - 1) / bw as usize;
        let blocks_y = (height as usize + bh as usize - 1) / bh as usize;
        blocks_x
            .checked_mul(blocks_y)?
            .checked_mul(self.bytes_per_block()?)
    }

    /// Whether the payload is a crunch archive rather than raw block data.
    #[inline]
    pub fn is_crunched(self) -> bool {
        matches!(self, TextureFormat::Crunch | TextureFormat::UnityCrunch)
    }

    /// Whether the backing decoder emits B,G,R,A ordered pixels that need
    /// channel normalization.  Every current backend does; the dispatch
    /// layer consults this flag rather than assuming it.
    #[inline]
    pub fn emits_bgra(self) -> bool {
        true
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureFormat::Bc1          => f.write_str("bc1"),
            TextureFormat::Bc2          => f.write_str("bc2"),
            TextureFormat::Bc3          => f.write_str("bc3"),
            TextureFormat::Bc4          => f.write_str("bc4"),
            TextureFormat::Bc5          => f.write_str("bc5"),
            TextureFormat::Bc6          => f.write_str("bc6"),
            TextureFormat::Bc7          => f.write_str("bc7"),
            TextureFormat::Etc1         => f.write_str("etc1"),
            TextureFormat::Etc2         => f.write_str("etc2"),
            TextureFormat::Etc2A1       => f.write_str("etc2a1"),
            TextureFormat::Etc2A8       => f.write_str("etc2a8"),
            TextureFormat::EacR         => f.write_str("eac-r"),
            TextureFormat::EacRSigned   => f.write_str("eac-r-signed"),
            TextureFormat::EacRg        => f.write_str("eac-rg"),
            TextureFormat::EacRgSigned  => f.write_str("eac-rg-signed"),
            TextureFormat::Pvrtc2Bpp    => f.write_str("pvrtc-2bpp"),
            TextureFormat::Pvrtc4Bpp    => f.write_str("pvrtc-4bpp"),
            TextureFormat::AtcRgb4      => f.write_str("atc-rgb4"),
            TextureFormat::AtcRgba8     => f.write_str("atc-rgba8"),
            TextureFormat::Astc { block_width, block_height } => {
                write!(f, "astc-{}x{}", block_width, block_height)
            }
            TextureFormat::Crunch       => f.write_str("crunch"),
            TextureFormat::UnityCrunch  => f.write_str("unity-crunch"),
        }
    }
}
