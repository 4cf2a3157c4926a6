//! Code layout derived from the palette size.

use crate::error::{LzwError, Result};

/// Hard ceiling on the code bit width (the GIF maximum).
pub const MAX_CODE_BITS: u8 = 12;

/// Total code space: no dictionary ever holds more than this many codes.
pub const MAX_DICT_LEN: u16 = 1 << MAX_CODE_BITS;

/// Largest payload a GIF raster sub-block may carry.
pub const MAX_BLOCK_PAYLOAD: usize = 255;

/// GIF LZW code layout for a given palette.
///
/// The initial dictionary holds one literal code per possible palette index,
/// rounded up to a power of two, followed by the two reserved codes (clear and
/// end-of-information). The initial code width is the number of bits needed
/// for the literal codes plus one, with a floor of 3 bits as required by GIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    palette_size: u16,
    init_code_len: u8,
    init_dict_len: u16,
}

impl LzwConfig {
    /// Layout for a full 256-entry palette: 9-bit initial codes, clear = 256.
    pub const FULL_PALETTE: Self = Self {
        palette_size: 256,
        init_code_len: 9,
        init_dict_len: 256,
    };

    /// Derive the code layout for a palette of `palette_size` colors.
    ///
    /// # Errors
    ///
    /// Returns [`LzwError::InvalidPaletteSize`] if `palette_size` is zero or
    /// exceeds 256.
    pub fn for_palette(palette_size: u16) -> Result<Self> {
        if palette_size == 0 || palette_size > 256 {
            return Err(LzwError::InvalidPaletteSize(palette_size));
        }
        let exp = next_pow2_exp(palette_size);
        Ok(Self {
            palette_size,
            init_code_len: (exp + 1).max(3),
            init_dict_len: 1 << exp,
        })
    }

    /// Number of palette entries this layout was derived from.
    pub fn palette_size(&self) -> u16 {
        self.palette_size
    }

    /// Initial code width in bits.
    pub fn init_code_len(&self) -> u8 {
        self.init_code_len
    }

    /// Number of literal single-symbol codes in a fresh dictionary.
    pub fn init_dict_len(&self) -> u16 {
        self.init_dict_len
    }

    /// The clear code: resets the dictionary and the code width.
    pub fn clear_code(&self) -> u16 {
        self.init_dict_len
    }

    /// The end-of-information code terminating every code stream.
    pub fn end_code(&self) -> u16 {
        self.init_dict_len + 1
    }

    /// First code available for learned multi-symbol entries.
    pub fn first_code(&self) -> u16 {
        self.init_dict_len + 2
    }

    /// The "LZW minimum code size" byte a GIF container stores before the
    /// raster data sub-blocks.
    pub fn min_code_size(&self) -> u8 {
        self.init_code_len - 1
    }
}

/// Smallest `p` such that `2^p >= n`.
fn next_pow2_exp(n: u16) -> u8 {
    let mut exp = 0u8;
    while u32::from(n) > (1u32 << exp) {
        exp += 1;
    }
    exp
}
