//! LSB-first bit stream packing for GIF LZW.
//!
//! GIF packs codes least-significant-bit first, unlike the MSB-first order
//! used by TIFF LZW or DEFLATE.

use crate::config::{LzwConfig, MAX_CODE_BITS};
use crate::error::Result;

/// LSB-first bit writer.
#[derive(Debug)]
pub struct LsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer; new bits enter above the existing ones.
    buffer: u32,
    /// Number of valid bits in the buffer.
    bits_in_buffer: u8,
}

impl LsbBitWriter {
    /// Create a writer with room for `capacity` output bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LzwError::Allocation`] if the buffer cannot be
    /// allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut output = Vec::new();
        output.try_reserve_exact(capacity)?;
        Ok(Self {
            output,
            buffer: 0,
            bits_in_buffer: 0,
        })
    }

    /// Write the low `count` bits of `value`, LSB-first. `count` must be at
    /// most 16.
    pub fn write_bits(&mut self, value: u16, count: u8) {
        debug_assert!(count > 0 && count <= 16);

        let mask = (1u32 << count) - 1;
        self.buffer |= (u32::from(value) & mask) << self.bits_in_buffer;
        self.bits_in_buffer += count;

        // Flush complete bytes from the low end.
        while self.bits_in_buffer >= 8 {
            self.output.push((self.buffer & 0xFF) as u8);
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }
    }

    /// Finish the stream, zero-padding a trailing partial byte.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            self.output.push((self.buffer & 0xFF) as u8);
        }
        self.output
    }
}

/// Serializes a code stream into packed bytes, tracking code width growth.
///
/// The width starts at the initial code length and grows by one bit whenever
/// the number of codes written since the last clear reaches the capacity of
/// the current width (mirroring the encoder's dictionary size), capped at
/// [`MAX_CODE_BITS`]. A clear code in the stream resets the width and the
/// growth counter, keeping packer and dictionary in lockstep across resets.
#[derive(Debug)]
pub struct CodePacker {
    config: LzwConfig,
    code_width: u8,
    /// Dictionary size at which the current width overflows; doubles on
    /// each width bump.
    threshold: u32,
    /// Codes written since the last clear, counting the clear itself.
    written: u32,
}

impl CodePacker {
    /// Create a packer for the given code layout.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            config,
            code_width: config.init_code_len(),
            threshold: 2 * u32::from(config.init_dict_len()),
            written: 1,
        }
    }

    /// Pack `codes` into a contiguous LSB-first byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LzwError::Allocation`] if the output buffer cannot
    /// be allocated.
    pub fn pack(mut self, codes: &[u16]) -> Result<Vec<u8>> {
        let max_bytes = codes.len() * usize::from(MAX_CODE_BITS) / 8 + 2;
        let mut writer = LsbBitWriter::with_capacity(max_bytes)?;

        let init = u32::from(self.config.init_dict_len());
        for &code in codes {
            if self.code_width < MAX_CODE_BITS && self.written == self.threshold - init {
                self.code_width += 1;
                self.threshold *= 2;
            }
            writer.write_bits(code, self.code_width);
            self.written += 1;
            if code == self.config.clear_code() {
                self.code_width = self.config.init_code_len();
                self.threshold = 2 * init;
                self.written = 1;
            }
        }

        Ok(writer.into_vec())
    }
}
