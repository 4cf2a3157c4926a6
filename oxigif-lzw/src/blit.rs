//! Region copy for flat indexed-pixel buffers.
//!
//! This is the host-side compositing helper that pairs with the encoder:
//! images are flat row-major buffers of palette indices, and a frame is
//! assembled by blitting source regions into a destination before the
//! destination is compressed. It shares nothing with the LZW core beyond
//! the palette-index pixel representation.

use crate::error::{LzwError, Result};

/// Copy a `width x height` pixel region between two row-major index buffers.
///
/// The region is read from `src` (row stride `src_width`) at `src_origin`
/// and written into `dst` (row stride `dst_width`) at `dst_origin`, both
/// given as `(x, y)`. When `transparent` is set, source pixels equal to that
/// index are skipped, leaving the destination pixel untouched.
///
/// # Errors
///
/// Returns [`LzwError::RegionOutOfBounds`] if the region escapes either
/// buffer, including a region wider than a row. Nothing is written on error.
pub fn copy_region(
    dst: &mut [u8],
    dst_width: usize,
    dst_origin: (usize, usize),
    src: &[u8],
    src_width: usize,
    src_origin: (usize, usize),
    extent: (usize, usize),
    transparent: Option<u8>,
) -> Result<()> {
    let (width, height) = extent;
    if width == 0 || height == 0 {
        return Ok(());
    }
    check_region(src.len(), src_width, src_origin, extent)?;
    check_region(dst.len(), dst_width, dst_origin, extent)?;

    let (sx, sy) = src_origin;
    let (dx, dy) = dst_origin;
    for row in 0..height {
        let src_row = &src[(sy + row) * src_width + sx..][..width];
        let dst_row = &mut dst[(dy + row) * dst_width + dx..][..width];
        match transparent {
            None => dst_row.copy_from_slice(src_row),
            Some(skip) => {
                for (d, &s) in dst_row.iter_mut().zip(src_row) {
                    if s != skip {
                        *d = s;
                    }
                }
            }
        }
    }
    Ok(())
}

fn check_region(
    len: usize,
    row_width: usize,
    origin: (usize, usize),
    extent: (usize, usize),
) -> Result<()> {
    let (x, y) = origin;
    let (width, height) = extent;
    let out_of_bounds = || LzwError::RegionOutOfBounds {
        x,
        y,
        width,
        height,
    };
    let row_end = x.checked_add(width).ok_or_else(out_of_bounds)?;
    if row_end > row_width {
        return Err(out_of_bounds());
    }
    // Last touched index: end of the region's bottom row.
    let last_index = y
        .checked_add(height - 1)
        .and_then(|row| row.checked_mul(row_width))
        .and_then(|start| start.checked_add(row_end))
        .ok_or_else(out_of_bounds)?;
    if last_index > len {
        return Err(out_of_bounds());
    }
    Ok(())
}
