//! Gray quantization and first-seen palette indexing for 1/4/8-bit output.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use enough::Stop;

use super::ColorBit;
use crate::error::BitmapError;
use crate::pixel::{BGR_BYTES, PixelBuffer};

/// One color table entry. Identity is the (R, G, B) triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PaletteEntry {
    pub(crate) const fn gray(v: u8) -> Self {
        Self {
            red: v,
            green: v,
            blue: v,
        }
    }

    /// `(R << 16) | (G << 8) | B`
    pub(crate) fn key(self) -> u32 {
        (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }

    /// On-disk RGBQUAD: blue, green, red, reserved.
    pub(crate) fn to_rgbquad(self) -> [u8; 4] {
        [self.blue, self.green, self.red, 0]
    }
}

/// Rec. 709 luma, truncated.
///
/// The weights sum to 1.0, but pure white adds up to 254.99999999999997 in
/// f64, so it maps to 254, not 255.
pub(crate) fn luma(blue: u8, green: u8, red: u8) -> u8 {
    let y = 0.0722 * f64::from(blue) + 0.7152 * f64::from(green) + 0.2126 * f64::from(red);
    y as u8
}

/// Reduce a BGR pixel to the gray level representable at `bits`.
pub(crate) fn quantize(bits: ColorBit, blue: u8, green: u8, red: u8) -> PaletteEntry {
    let y = luma(blue, green, red);
    match bits {
        ColorBit::Bit1 => {
            if f64::from(y) < 127.5 {
                PaletteEntry::gray(0)
            } else {
                PaletteEntry::gray(255)
            }
        }
        ColorBit::Bit4 => PaletteEntry::gray(y & 0xF0),
        _ => PaletteEntry::gray(y),
    }
}

/// Ordered color table with reverse lookup, built per encode call.
#[derive(Debug)]
pub(crate) struct Palette {
    bit_depth: u16,
    entries: Vec<PaletteEntry>,
    lookup: BTreeMap<u32, u8>,
}

impl Palette {
    pub(crate) fn new(bits: ColorBit) -> Self {
        Self {
            bit_depth: bits.bits(),
            entries: Vec::new(),
            lookup: BTreeMap::new(),
        }
    }

    /// Maximum number of entries addressable at this bit depth.
    pub(crate) fn capacity(&self) -> usize {
        1 << self.bit_depth
    }

    pub(crate) fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Index of `entry`, appending it on first sight.
    pub(crate) fn index_of(&mut self, entry: PaletteEntry) -> Result<u8, BitmapError> {
        let key = entry.key();
        if let Some(&idx) = self.lookup.get(&key) {
            return Ok(idx);
        }
        // capacity() <= 256, so every accepted index fits in a u8
        if self.entries.len() >= self.capacity() {
            return Err(BitmapError::PaletteOverflow {
                bit_depth: self.bit_depth,
                capacity: self.capacity(),
            });
        }
        let idx = self.entries.len() as u8;
        log::trace!(
            "palette[{idx}] = ({}, {}, {})",
            entry.red,
            entry.green,
            entry.blue
        );
        self.entries.push(entry);
        self.lookup.insert(key, idx);
        Ok(idx)
    }

    /// Serialized color table, 4 bytes per entry.
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|e| e.to_rgbquad()).collect()
    }
}

/// Write `index` as the `pos`-th `bits`-wide field of `row`, MSB first.
///
/// `row` must be zeroed beforehand; fields are OR-ed in.
fn put_index(row: &mut [u8], pos: usize, bits: usize, index: u8) {
    let bit = pos * bits;
    let shift = 8 - bits - bit % 8;
    row[bit / 8] |= index << shift;
}

/// Indexed image ready to stream: the palette plus every packed row in file
/// order (bottom scanline first).
#[derive(Debug)]
pub(crate) struct IndexedImage {
    pub palette: Palette,
    pub rows: Vec<u8>,
}

/// Quantize and index the whole buffer.
///
/// Pixels are visited in file order, so palette indices follow first
/// appearance scanning bottom-to-top, left-to-right.
pub(crate) fn index_image(
    buffer: &PixelBuffer,
    bits: ColorBit,
    stride: usize,
    stop: &dyn Stop,
) -> Result<IndexedImage, BitmapError> {
    let depth = usize::from(bits.bits());
    let mut palette = Palette::new(bits);
    let len = stride
        .checked_mul(buffer.height() as usize)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: buffer.width(),
            height: buffer.height(),
        })?;
    let mut rows = Vec::new();
    rows.try_reserve_exact(len)
        .map_err(|_| BitmapError::AllocationFailed { bytes: len })?;
    rows.resize(len, 0);

    for (out_row, y) in rows.chunks_exact_mut(stride).zip((0..buffer.height()).rev()) {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src = buffer.row(y)?;
        for (x, px) in src.chunks_exact(BGR_BYTES).enumerate() {
            let idx = palette.index_of(quantize(bits, px[0], px[1], px[2]))?;
            put_index(out_row, x, depth, idx);
        }
    }

    Ok(IndexedImage { palette, rows })
}
