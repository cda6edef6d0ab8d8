pub mod format;
pub mod image;
pub mod writer;
pub mod decode;
pub mod crunch;
pub mod wav;
pub mod png;

pub use format::TextureFormat;
pub use image::{swap_red_blue, CanonicalImage};
pub use writer::ByteWriter;
pub use decode::{decode, DecodeError};
pub use crunch::{unpack_crunch, unpack_unity_crunch, CrunchInfo, CrunchVariant, UnpackedLevel};
pub use wav::{encode_pcm, encode_wav, WavFormat};
pub use self::png::{encode_png, PngError};
