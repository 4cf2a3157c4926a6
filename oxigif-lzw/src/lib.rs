//! # OxiGif-LZW: Pure Rust GIF LZW Compression
//!
//! This crate compresses streams of indexed-color pixel values into
//! GIF-compliant LZW raster data. It is the acceleration path of a GIF
//! encoder: the host supplies a flat sequence of palette indices and gets
//! back the complete sub-block sequence that follows a GIF Image Descriptor.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **GIF LZW**: LSB-first bit order, clear-code dictionary resets,
//!   variable 3-12 bit code widths
//! - **Arena dictionary**: dense literal-prefix table plus a sparse node
//!   arena with a shared overflow pool; no per-node allocation
//! - **Sub-block framing**: output is ready to embed after the "LZW minimum
//!   code size" byte (see [`LzwConfig::min_code_size`])
//!
//! ## Example
//!
//! ```rust
//! use oxigif_lzw::encode_raster;
//!
//! let pixels = [0u8, 0, 1, 1, 0, 0, 1, 1];
//! let raster = encode_raster(&pixels, 256).unwrap();
//!
//! // Length-prefixed sub-blocks with a zero terminator.
//! assert_eq!(raster[0] as usize, raster.len() - 2);
//! assert_eq!(*raster.last().unwrap(), 0);
//! ```
//!
//! Decompression is out of scope; any GIF-compliant LZW decoder reads the
//! output. The integration tests use the `weezl` crate as the reference.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bitstream_lsb;
mod blit;
mod blocks;
mod config;
mod dictionary;
mod encoder;
mod error;

pub use blit::copy_region;
pub use config::{LzwConfig, MAX_BLOCK_PAYLOAD, MAX_CODE_BITS, MAX_DICT_LEN};
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

/// Compress palette indices into GIF raster data (convenience function).
///
/// Derives the code layout from `palette_size` and runs one encode pass.
/// Every call allocates its own context, so concurrent calls need no
/// coordination.
///
/// # Errors
///
/// - [`LzwError::InvalidPaletteSize`] for palette sizes outside 1..=256.
/// - [`LzwError::CorruptInput`] if a pixel value is outside the alphabet
///   derived from `palette_size`.
/// - [`LzwError::Allocation`] if working buffers cannot be allocated.
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::{LzwConfig, encode_raster};
///
/// let raster = encode_raster(&[0, 1, 0, 1], 4).unwrap();
/// assert_eq!(*raster.last().unwrap(), 0);
///
/// // The byte a GIF container writes before the raster data:
/// let min_code_size = LzwConfig::for_palette(4).unwrap().min_code_size();
/// assert_eq!(min_code_size, 2);
/// ```
pub fn encode_raster(pixels: &[u8], palette_size: u16) -> Result<Vec<u8>> {
    let config = LzwConfig::for_palette(palette_size)?;
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(pixels)
}
