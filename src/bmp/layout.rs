//! Row stride and derived header sizes.

use crate::error::BitmapError;

pub(crate) const FILE_HEADER_SIZE: usize = 14;
pub(crate) const INFO_HEADER_SIZE: usize = 40;
/// Three u32 channel masks following the info header.
pub(crate) const MASKS_SIZE: usize = 12;
/// One RGBQUAD per palette entry.
pub(crate) const PALETTE_ENTRY_SIZE: usize = 4;

/// Bytes per encoded row, including end-of-row padding.
///
/// Bits are first packed into whole bytes, then the byte count is padded to
/// a 4-byte boundary.
pub(crate) fn row_stride(width: u32, bits_per_pixel: u16) -> Option<usize> {
    let bits = (width as usize).checked_mul(usize::from(bits_per_pixel))?;
    let bits = bits.checked_add(7)? & !7;
    let bytes = bits / 8;
    Some(bytes.checked_add(3)? & !3)
}

/// Sizes and offsets for one encode call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub stride: usize,
    pub image_size: usize,
    pub pixel_offset: usize,
    pub file_size: usize,
}

impl Layout {
    /// `extra` is the byte size of whatever sits between the info header and
    /// the pixel rows (palette table or channel masks).
    pub(crate) fn new(
        width: u32,
        height: u32,
        bits_per_pixel: u16,
        extra: usize,
    ) -> Result<Self, BitmapError> {
        let too_large = BitmapError::DimensionsTooLarge { width, height };
        let stride = row_stride(width, bits_per_pixel).ok_or(too_large)?;
        let image_size = stride
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let pixel_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + extra;
        let file_size = pixel_offset
            .checked_add(image_size)
            .filter(|&s| u32::try_from(s).is_ok())
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            stride,
            image_size,
            pixel_offset,
            file_size,
        })
    }
}
