//! BMP encoder: 24-bit BGR, 1/4/8-bit gray palette, 16/32-bit bitfields.
//!
//! Every encoder writes the file header, the info header, the palette or
//! masks, then the pixel rows bottom scanline first.

use enough::Stop;

use super::bitfields::{self, BitfieldPacker};
use super::header::{self, FileHeader, InfoHeader};
use super::layout::{FILE_HEADER_SIZE, INFO_HEADER_SIZE, Layout, MASKS_SIZE, PALETTE_ENTRY_SIZE};
use super::palette;
use super::{ChannelMasks, ColorBit, Compression};
use crate::error::BitmapError;
use crate::pixel::{BGR_BYTES, PixelBuffer};
use crate::sink::ByteSink;

fn put_headers<S: ByteSink>(sink: &mut S, file: FileHeader, info: InfoHeader) -> Result<(), BitmapError> {
    let file: [u8; FILE_HEADER_SIZE] = file.into();
    let info: [u8; INFO_HEADER_SIZE] = info.into();
    sink.put(&file)?;
    sink.put(&info)
}

/// Uncompressed 24-bit BGR.
pub(crate) fn encode_24bit<S: ByteSink>(
    buffer: &PixelBuffer,
    sink: &mut S,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let (width, height) = (buffer.width(), buffer.height());
    let layout = Layout::new(width, height, ColorBit::Bit24.bits(), 0)?;
    let (file, info) = header::build(width, height, &layout, ColorBit::Bit24, Compression::Rgb, 0);
    log::debug!(
        "bmp24 {width}x{height}: stride {}, image {} bytes, file {} bytes",
        layout.stride,
        layout.image_size,
        layout.file_size
    );

    stop.check()?;
    put_headers(sink, file, info)?;

    let pad_bytes = layout.stride - width as usize * BGR_BYTES;
    for y in (0..height).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        // Storage is already BMP's native BGR order.
        sink.put(buffer.row(y)?)?;
        sink.put_zeros(pad_bytes)?;
    }
    Ok(())
}

/// Reject bit depth and compression pairings the indexed encoder can't label.
pub(crate) fn check_indexed(bits: ColorBit, compression: Compression) -> Result<(), BitmapError> {
    if !matches!(bits, ColorBit::Bit1 | ColorBit::Bit4 | ColorBit::Bit8) {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "indexed output needs 1, 4 or 8 bpp, got {}",
            bits.bits()
        )));
    }
    match (compression, bits) {
        (Compression::Rgb, _) | (Compression::Rle8, ColorBit::Bit8) | (Compression::Rle4, ColorBit::Bit4) => {
            Ok(())
        }
        _ => Err(BitmapError::UnsupportedVariant(alloc::format!(
            "compression {compression:?} not possible at {} bpp",
            bits.bits()
        ))),
    }
}

/// Gray palette output at 1, 4 or 8 bits per pixel.
///
/// The palette size is only known after every pixel has been indexed, so
/// the packed rows are built in a scratch buffer before anything is written.
/// `Rle8`/`Rle4` only change the compression field; rows stay uncompressed.
pub(crate) fn encode_indexed<S: ByteSink>(
    buffer: &PixelBuffer,
    bits: ColorBit,
    compression: Compression,
    sink: &mut S,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    check_indexed(bits, compression)?;
    let (width, height) = (buffer.width(), buffer.height());
    let stride = Layout::new(width, height, bits.bits(), 0)?.stride;

    stop.check()?;
    let indexed = palette::index_image(buffer, bits, stride, stop)?;
    let colors = indexed.palette.len();
    let layout = Layout::new(width, height, bits.bits(), colors * PALETTE_ENTRY_SIZE)?;
    let (file, info) = header::build(width, height, &layout, bits, compression, colors as u32);
    log::debug!(
        "bmp{} {compression:?} {width}x{height}: {colors} colors, stride {}, file {} bytes",
        bits.bits(),
        layout.stride,
        layout.file_size
    );

    put_headers(sink, file, info)?;
    sink.put(&indexed.palette.to_bytes())?;
    for (i, row) in indexed.rows.chunks_exact(stride).enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        sink.put(row)?;
    }
    Ok(())
}

/// 16 or 32-bit BI_BITFIELDS with caller-supplied masks.
pub(crate) fn encode_bitfields<S: ByteSink>(
    buffer: &PixelBuffer,
    bits: ColorBit,
    masks: ChannelMasks,
    sink: &mut S,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    bitfields::check_depth(bits)?;
    let (width, height) = (buffer.width(), buffer.height());
    let layout = Layout::new(width, height, bits.bits(), MASKS_SIZE)?;
    let (file, info) = header::build(width, height, &layout, bits, Compression::Bitfields, 0);
    let packer = BitfieldPacker::new(masks);
    log::debug!(
        "bmp{} bitfields {width}x{height} masks r={:#010x} g={:#010x} b={:#010x}: file {} bytes",
        bits.bits(),
        masks.red,
        masks.green,
        masks.blue,
        layout.file_size
    );

    stop.check()?;
    put_headers(sink, file, info)?;
    sink.put(&masks.red.to_le_bytes())?;
    sink.put(&masks.green.to_le_bytes())?;
    sink.put(&masks.blue.to_le_bytes())?;

    let word = usize::from(bits.bits() / 8);
    // Only odd-width 16-bit rows need padding.
    let pad_bytes = layout.stride - width as usize * word;
    for y in (0..height).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in buffer.row(y)?.chunks_exact(BGR_BYTES) {
            let v = packer.pack(px[0], px[1], px[2]);
            if bits == ColorBit::Bit16 {
                sink.put(&(v as u16).to_le_bytes())?;
            } else {
                sink.put(&v.to_le_bytes())?;
            }
        }
        sink.put_zeros(pad_bytes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn u32_at(b: &[u8], o: usize) -> u32 {
        u32::from_le_bytes(b[o..o + 4].try_into().unwrap())
    }

    #[test]
    fn black_2x2_24bit() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let mut out = Vec::new();
        encode_24bit(&buf, &mut out, &Unstoppable).unwrap();
        assert_eq!(out.len(), 70);
        assert_eq!(u32_at(&out, 2), 70);
        assert_eq!(u32_at(&out, 10), 54);
        assert_eq!(u32_at(&out, 34), 16);
        assert!(out[54..].iter().all(|&b| b == 0));
    }

    #[test]
    fn indexed_pairings() {
        use ColorBit::*;
        use Compression::*;
        for bits in [Bit1, Bit4, Bit8] {
            assert!(check_indexed(bits, Rgb).is_ok());
        }
        assert!(check_indexed(Bit8, Rle8).is_ok());
        assert!(check_indexed(Bit4, Rle4).is_ok());
        assert!(check_indexed(Bit4, Rle8).is_err());
        assert!(check_indexed(Bit8, Rle4).is_err());
        assert!(check_indexed(Bit1, Rle4).is_err());
        assert!(check_indexed(Bit8, Bitfields).is_err());
        assert!(check_indexed(Bit24, Rgb).is_err());
        assert!(check_indexed(Bit16, Rgb).is_err());
    }

    #[test]
    fn indexed_rejects_before_writing() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let mut out = Vec::new();
        let err = encode_indexed(&buf, ColorBit::Bit24, Compression::Rgb, &mut out, &Unstoppable);
        assert!(matches!(err, Err(BitmapError::UnsupportedVariant(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn bitfields_rejects_before_writing() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let mut out = Vec::new();
        let err = encode_bitfields(&buf, ColorBit::Bit8, ChannelMasks::RGB888, &mut out, &Unstoppable);
        assert!(matches!(err, Err(BitmapError::UnsupportedVariant(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn odd_width_16bit_rows_are_padded() {
        let mut buf = PixelBuffer::new(3, 1).unwrap();
        buf.fill(255, 255, 255);
        let mut out = Vec::new();
        encode_bitfields(&buf, ColorBit::Bit16, ChannelMasks::RGB565, &mut out, &Unstoppable).unwrap();
        assert_eq!(u32_at(&out, 10), 66);
        assert_eq!(u32_at(&out, 34), 8);
        assert_eq!(&out[66..], &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0]);
    }

    struct AlreadyCancelled;

    impl Stop for AlreadyCancelled {
        fn check(&self) -> Result<(), enough::StopReason> {
            Err(enough::StopReason::Cancelled)
        }
    }

    #[test]
    fn cancelled_before_output() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let mut out = Vec::new();
        let err = encode_24bit(&buf, &mut out, &AlreadyCancelled);
        assert!(matches!(err, Err(BitmapError::Cancelled(_))));
        assert!(out.is_empty());
    }
}
