//! Owning pixel canvas with one-call save methods.

use enough::Unstoppable;

#[cfg(feature = "std")]
use crate::bmp::{ChannelMasks, ColorBit, Compression};
use crate::encode::EncodeRequest;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// A [`PixelBuffer`] plus save methods for each BMP mode.
///
/// The buffer is released when the writer is dropped, on every path.
/// Saves never cancel; use [`EncodeRequest`] with a [`enough::Stop`] token
/// for that.
#[derive(Clone, Debug)]
pub struct BitmapWriter {
    buffer: PixelBuffer,
}

impl BitmapWriter {
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
        })
    }

    pub fn with_limits(width: u32, height: u32, limits: &Limits) -> Result<Self, BitmapError> {
        Ok(Self {
            buffer: PixelBuffer::with_limits(width, height, limits)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// `(red, green, blue)` at `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<(u8, u8, u8), BitmapError> {
        self.buffer.get(x, y)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8) -> Result<(), BitmapError> {
        self.buffer.set(x, y, red, green, blue)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// 24-bit BGR, rows padded to 4 bytes.
    #[cfg(feature = "std")]
    pub fn save_uncompressed_24bit(&self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        EncodeRequest::bmp24().save(&self.buffer, path, Unstoppable)
    }

    /// Gray palette at 1, 4 or 8 bpp.
    ///
    /// `compression` must be `Rgb`, `Rle8` with 8 bpp, or `Rle4` with 4 bpp.
    /// The RLE codes label the header only; rows are written uncompressed.
    #[cfg(feature = "std")]
    pub fn save_quantized_palette(
        &self,
        path: impl AsRef<std::path::Path>,
        bits: ColorBit,
        compression: Compression,
    ) -> Result<(), BitmapError> {
        EncodeRequest::indexed(bits, compression).save(&self.buffer, path, Unstoppable)
    }

    /// 16 or 32-bit bitfields with the given channel masks.
    #[cfg(feature = "std")]
    pub fn save_bit_field_masks(
        &self,
        path: impl AsRef<std::path::Path>,
        bits: ColorBit,
        red_mask: u32,
        green_mask: u32,
        blue_mask: u32,
    ) -> Result<(), BitmapError> {
        let masks = ChannelMasks::new(red_mask, green_mask, blue_mask);
        EncodeRequest::bitfields(bits, masks).save(&self.buffer, path, Unstoppable)
    }

    /// 32-bit bitfields with masks `0x00FF0000`, `0x0000FF00`, `0x000000FF`.
    #[cfg(feature = "std")]
    pub fn save_standard_rgb888(&self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        self.save_bit_field_masks(path, ColorBit::Bit32, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF)
    }

    /// In-memory counterpart of the `save_*` methods.
    pub fn encode(&self, request: EncodeRequest) -> Result<alloc::vec::Vec<u8>, BitmapError> {
        request.encode(&self.buffer, Unstoppable)
    }
}
