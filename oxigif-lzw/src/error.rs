//! Error types for GIF LZW encoding.

use std::collections::TryReserveError;
use thiserror::Error;

/// GIF LZW encoding errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// A pixel value falls outside the alphabet derived from the palette.
    #[error("corrupt input: symbol {symbol} outside the {alphabet}-entry alphabet")]
    CorruptInput {
        /// The offending palette index.
        symbol: u8,
        /// Size of the initial dictionary (the valid symbol range).
        alphabet: u16,
    },

    /// Palette size outside the supported 1..=256 range.
    #[error("invalid palette size: {0} (must be 1-256)")]
    InvalidPaletteSize(u16),

    /// A working buffer (trie tables, code buffer, output) could not be allocated.
    #[error("buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// A blit region does not fit inside the source or destination buffer.
    #[error("region out of bounds: {width}x{height} pixels at ({x}, {y})")]
    RegionOutOfBounds {
        /// X origin of the offending region.
        x: usize,
        /// Y origin of the offending region.
        y: usize,
        /// Region width in pixels.
        width: usize,
        /// Region height in pixels.
        height: usize,
    },
}

/// Result type for GIF LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
