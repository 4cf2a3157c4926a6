//! OxiGif CLI - GIF LZW raster-data encoding
//!
//! Compresses files of raw palette indices into GIF LZW raster data streams.

use clap::{Parser, Subcommand};
use oxigif_lzw::{LzwConfig, encode_raster};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oxigif")]
#[command(
    author,
    version,
    about = "Pure Rust GIF LZW raster-data encoder"
)]
#[command(long_about = "
OxiGif compresses indexed-color pixel data into GIF-compliant LZW raster
data: the length-prefixed sub-block stream that follows an Image Descriptor
in a GIF file. Input files are raw palette indices, one byte per pixel.

Examples:
  oxigif encode frame.idx
  oxigif encode frame.idx -o frame.lzw --palette-size 64
  oxigif info --palette-size 16
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file of raw palette indices into raster data
    #[command(alias = "e")]
    Encode {
        /// Input file (one palette index per byte)
        input: PathBuf,

        /// Output file (defaults to the input path with a .lzw extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of palette entries the indices refer to
        #[arg(short, long, default_value = "256")]
        palette_size: u16,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the code layout derived from a palette size
    Info {
        /// Number of palette entries
        #[arg(short, long, default_value = "256")]
        palette_size: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            palette_size,
            verbose,
        } => cmd_encode(&input, output.as_deref(), palette_size, verbose),
        Commands::Info { palette_size } => cmd_info(palette_size),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_encode(
    input: &Path,
    output: Option<&Path>,
    palette_size: u16,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pixels = std::fs::read(input)?;
    let raster = encode_raster(&pixels, palette_size)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("lzw"),
    };
    std::fs::write(&output, &raster)?;

    if verbose {
        let config = LzwConfig::for_palette(palette_size)?;
        println!("Input:             {} ({} pixels)", input.display(), pixels.len());
        println!("Output:            {} ({} bytes)", output.display(), raster.len());
        println!("Minimum code size: {}", config.min_code_size());
        if !raster.is_empty() {
            println!(
                "Ratio:             {:.2}:1",
                pixels.len() as f64 / raster.len() as f64
            );
        }
    } else {
        println!(
            "{} -> {} ({} -> {} bytes)",
            input.display(),
            output.display(),
            pixels.len(),
            raster.len()
        );
    }

    Ok(())
}

fn cmd_info(palette_size: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = LzwConfig::for_palette(palette_size)?;

    println!("Palette size:        {}", config.palette_size());
    println!("Initial code width:  {} bits", config.init_code_len());
    println!("Initial dictionary:  {} literal codes", config.init_dict_len());
    println!("Clear code:          {}", config.clear_code());
    println!("End code:            {}", config.end_code());
    println!("First learned code:  {}", config.first_code());
    println!("Minimum code size:   {}", config.min_code_size());

    Ok(())
}
