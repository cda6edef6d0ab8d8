use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use texport::crunch::{self, CrunchVariant};
use texport::{decode, encode_pcm, encode_png, CanonicalImage, TextureFormat};

#[derive(Parser)]
#[command(name = "texport", about = "Decode game texture payloads and re-encode them as PNG and WAV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw compressed texture payload to PNG
    Decode {
        input: PathBuf,
        /// Format tag (run `formats` for the full list)
        #[arg(short, long)]
        format: String,
        /// Texture width in pixels
        #[arg(short = 'W', long)]
        width: u32,
        /// Texture height in pixels
        #[arg(short = 'H', long)]
        height: u32,
        /// Flip rows for bottom-up source textures
        #[arg(long)]
        flip: bool,
        /// Output path (defaults to the input with a .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Unpack a crunch archive level and write it as PNG
    Crunch {
        input: PathBuf,
        /// Treat the archive as the unity dialect
        #[arg(short, long)]
        unity: bool,
        /// Level to unpack
        #[arg(short, long, default_value = "0")]
        level: u32,
        /// Flip rows for bottom-up source textures
        #[arg(long)]
        flip: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a crunch archive's declared header metadata
    Info {
        input: PathBuf,
        /// Treat the archive as the unity dialect
        #[arg(short, long)]
        unity: bool,
    },
    /// Wrap a raw PCM payload in a WAV container
    Wav {
        input: PathBuf,
        #[arg(short, long)]
        channels: u16,
        /// Sample rate in Hz
        #[arg(short, long)]
        rate: u32,
        /// Integer sample width in bytes (1-4)
        #[arg(short = 'w', long, default_value = "2")]
        sample_width: u32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List supported texture format names
    Formats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {

        // ── Decode ───────────────────────────────────────────────────────────
        Commands::Decode { input, format, width, height, flip, output } => {
            let format = parse_format(&format)?;
            let data = std::fs::read(&input)?;
            let mut image = decode(format, &data, width, height)?;
            if flip { image.flip_vertical(); }
            let out = output.unwrap_or_else(|| with_extension(&input, "png"));
            write_png(&image, &out)?;
            println!("Decoded {} ({} {}x{}) → {}",
                input.display(), format, width, height, out.display());
        }

        // ── Crunch ───────────────────────────────────────────────────────────
        Commands::Crunch { input, unity, level, flip, output } => {
            let variant = pick_variant(unity);
            let data = std::fs::read(&input)?;
            let mut image = crunch::unpack_level(&data, level, variant)?.into_image();
            if flip { image.flip_vertical(); }
            let out = output.unwrap_or_else(|| with_extension(&input, "png"));
            write_png(&image, &out)?;
            println!("Unpacked level {} ({}x{}) → {}",
                level, image.width(), image.height(), out.display());
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input, unity } => {
            let variant = pick_variant(unity);
            let data = std::fs::read(&input)?;
            let info = crunch::CrunchInfo::parse(&data, variant)?;
            let payload = info.payload_format
                .map(|f| f.to_string())
                .unwrap_or_else(|| "unsupported".into());

            println!("── Crunch archive ──────────────────────────────────────");
            println!("  Path            {}", input.display());
            println!("  Dialect         {}", variant.name());
            println!("  Dimensions      {}x{}", info.width, info.height);
            println!("  Levels          {}", info.levels);
            println!("  Faces           {}", info.faces);
            println!("  Bytes per block {}", info.bytes_per_block);
            println!("  Payload format  {}", payload);
            for level in 0..info.levels {
                let (w, h) = info.level_dimensions(level);
                println!("    level {:<2} {}x{}", level, w, h);
            }
        }

        // ── Wav ──────────────────────────────────────────────────────────────
        Commands::Wav { input, channels, rate, sample_width, output } => {
            let data = std::fs::read(&input)?;
            let wav = encode_pcm(channels, rate, sample_width, &data)
                .ok_or("Sample width must be 1-4 bytes")?;
            let out = output.unwrap_or_else(|| with_extension(&input, "wav"));
            std::fs::write(&out, wav)?;
            println!("Wrapped {} PCM bytes → {}", data.len(), out.display());
        }

        // ── Formats ──────────────────────────────────────────────────────────
        Commands::Formats => {
            for name in TextureFormat::NAMES {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn parse_format(s: &str) -> Result<TextureFormat, Box<dyn std::error::Error>> {
    TextureFormat::from_name(s)
        .ok_or_else(|| format!("Unknown format '{}' (run `texport formats` for the list)", s).into())
}

fn pick_variant(unity: bool) -> CrunchVariant {
    if unity { CrunchVariant::Unity } else { CrunchVariant::Standard }
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    out.set_extension(ext);
    out
}

fn write_png(image: &CanonicalImage, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, encode_png(image)?)?;
    Ok(())
}
