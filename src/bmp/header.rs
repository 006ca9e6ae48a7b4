//! BITMAPFILEHEADER and BITMAPINFOHEADER, serialized field by field.

use super::layout::{FILE_HEADER_SIZE, INFO_HEADER_SIZE, Layout};
use super::{ColorBit, Compression};

/// "BM", little-endian.
pub(crate) const SIGNATURE: u16 = 0x4D42;

/// The 14-byte header at the start of every BMP file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
}

impl From<FileHeader> for [u8; FILE_HEADER_SIZE] {
    fn from(h: FileHeader) -> Self {
        let mut a = [0; FILE_HEADER_SIZE];
        a[0..2].copy_from_slice(&SIGNATURE.to_le_bytes());
        a[2..6].copy_from_slice(&h.file_size.to_le_bytes());
        // 6..10: two reserved u16, zero
        a[10..14].copy_from_slice(&h.pixel_offset.to_le_bytes());
        a
    }
}

/// The 40-byte BITMAPINFOHEADER.
///
/// Header size and plane count are format constants and not stored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub width: i32,
    /// Positive: rows are stored bottom-up.
    pub height: i32,
    pub bit_count: ColorBit,
    pub compression: Compression,
    pub image_size: u32,
    pub colors_used: u32,
}

impl From<InfoHeader> for [u8; INFO_HEADER_SIZE] {
    fn from(h: InfoHeader) -> Self {
        let mut a = [0; INFO_HEADER_SIZE];
        a[0..4].copy_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
        a[4..8].copy_from_slice(&h.width.to_le_bytes());
        a[8..12].copy_from_slice(&h.height.to_le_bytes());
        a[12..14].copy_from_slice(&1u16.to_le_bytes()); // planes
        a[14..16].copy_from_slice(&h.bit_count.bits().to_le_bytes());
        a[16..20].copy_from_slice(&h.compression.code().to_le_bytes());
        a[20..24].copy_from_slice(&h.image_size.to_le_bytes());
        // 24..32: x/y pixels per meter, left at zero
        a[32..36].copy_from_slice(&h.colors_used.to_le_bytes());
        // 36..40: important colors, zero
        a
    }
}

/// Both headers for one encode call.
///
/// Dimensions were validated into `i32` range when the pixel buffer was
/// built, and `Layout` guarantees every size fits `u32`.
pub(crate) fn build(
    width: u32,
    height: u32,
    layout: &Layout,
    bit_count: ColorBit,
    compression: Compression,
    colors_used: u32,
) -> (FileHeader, InfoHeader) {
    let file = FileHeader {
        file_size: layout.file_size as u32,
        pixel_offset: layout.pixel_offset as u32,
    };
    let info = InfoHeader {
        width: width as i32,
        height: height as i32,
        bit_count,
        compression,
        image_size: layout.image_size as u32,
        colors_used,
    };
    (file, info)
}
