//! GIF LZW encoder (compression).

use crate::bitstream_lsb::CodePacker;
use crate::blocks;
use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::{LzwError, Result};

/// GIF LZW encoder.
///
/// Owns the per-call compression context (dictionary trie and buffers).
/// A single `encode` call runs the whole pipeline synchronously:
/// pixel symbols -> code stream -> packed bytes -> sub-blocks. Nothing is
/// shared between encoders, so independent instances may run on separate
/// threads without coordination.
#[derive(Debug)]
pub struct LzwEncoder {
    config: LzwConfig,
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create an encoder for the given code layout.
    ///
    /// # Errors
    ///
    /// Returns [`LzwError::Allocation`] if the dictionary arenas cannot be
    /// allocated.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self { config, dict })
    }

    /// The code layout this encoder was built with.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Compress a stream of palette indices into GIF raster data.
    ///
    /// The output is the complete sub-block sequence (including the zero
    /// terminator) that follows the "LZW minimum code size" byte in a GIF
    /// image; see [`LzwConfig::min_code_size`] for that byte.
    ///
    /// # Errors
    ///
    /// - [`LzwError::CorruptInput`] if any pixel value is outside the
    ///   alphabet derived from the palette size. No partial output is
    ///   returned.
    /// - [`LzwError::Allocation`] if a working buffer cannot be allocated.
    pub fn encode(&mut self, pixels: &[u8]) -> Result<Vec<u8>> {
        let codes = self.generate_codes(pixels)?;
        let packed = CodePacker::new(self.config).pack(&codes)?;
        blocks::chunk(&packed)
    }

    /// Run the dictionary state machine over `pixels`, producing the code
    /// stream: an initial clear code, the match codes (with further clear
    /// codes at every dictionary reset), and the end code.
    fn generate_codes(&mut self, pixels: &[u8]) -> Result<Vec<u16>> {
        let mut codes = Vec::new();
        // One code per symbol in the worst case, plus reserved codes and at
        // most one clear per 4096 symbols.
        codes.try_reserve_exact(pixels.len() + pixels.len() / 4096 + 3)?;

        self.dict.reset();
        codes.push(self.config.clear_code());

        let Some((&first, rest)) = pixels.split_first() else {
            codes.push(self.config.end_code());
            return Ok(codes);
        };

        let mut current = u16::from(self.check_symbol(first)?);
        for &symbol in rest {
            self.check_symbol(symbol)?;
            if let Some(code) = self.dict.lookup(current, symbol) {
                // Match extends; nothing is emitted yet.
                current = code;
            } else {
                codes.push(current);
                if self.dict.is_full() {
                    self.reset_dictionary(&mut codes);
                } else {
                    self.dict.insert(current, symbol);
                }
                current = u16::from(symbol);
            }
        }

        codes.push(current);
        codes.push(self.config.end_code());
        Ok(codes)
    }

    /// The dictionary-full transition: discard all learned codes and emit a
    /// clear code so the decoder discards its table too.
    fn reset_dictionary(&mut self, codes: &mut Vec<u16>) {
        self.dict.reset();
        codes.push(self.config.clear_code());
    }

    fn check_symbol(&self, symbol: u8) -> Result<u8> {
        if u16::from(symbol) >= self.config.init_dict_len() {
            return Err(LzwError::CorruptInput {
                symbol,
                alphabet: self.config.init_dict_len(),
            });
        }
        Ok(symbol)
    }
}
