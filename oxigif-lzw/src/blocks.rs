//! GIF raster-data sub-block framing.

use crate::config::MAX_BLOCK_PAYLOAD;
use crate::error::Result;

/// Split a packed byte stream into length-prefixed GIF sub-blocks.
///
/// Each sub-block is `[length][payload]` with a payload of at most
/// [`MAX_BLOCK_PAYLOAD`] bytes; a zero-length byte terminates the sequence.
///
/// # Errors
///
/// Returns [`crate::LzwError::Allocation`] if the output buffer cannot be
/// allocated.
pub fn chunk(data: &[u8]) -> Result<Vec<u8>> {
    let total = data.len() + data.len().div_ceil(MAX_BLOCK_PAYLOAD) + 1;
    let mut out = Vec::new();
    out.try_reserve_exact(total)?;

    for block in data.chunks(MAX_BLOCK_PAYLOAD) {
        out.push(block.len() as u8);
        out.extend_from_slice(block);
    }
    out.push(0);
    Ok(out)
}
