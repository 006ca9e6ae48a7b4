use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::layout::{Layout, MASKS_SIZE, PALETTE_ENTRY_SIZE};
use crate::bmp::{ChannelMasks, ColorBit, Compression, bitfields, encode};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;
use crate::sink::ByteSink;

/// Which BMP pixel encoding to produce.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmpMode {
    /// Uncompressed 24-bit BGR.
    Bgr24,
    /// Gray palette at 1, 4 or 8 bpp. `compression` is written to the header
    /// as given; rows are always uncompressed.
    Indexed {
        bits: ColorBit,
        compression: Compression,
    },
    /// 16 or 32-bit words with custom channel masks.
    Bitfields { bits: ColorBit, masks: ChannelMasks },
}

/// Builder for a single BMP encode.
///
/// ```
/// use zenbmpwriter::{EncodeRequest, PixelBuffer, Unstoppable};
///
/// let mut buf = PixelBuffer::new(4, 4)?;
/// buf.set(1, 2, 255, 0, 0)?;
/// let bytes = EncodeRequest::bmp24().encode(&buf, Unstoppable)?;
/// assert_eq!(&bytes[..2], b"BM");
/// # Ok::<(), zenbmpwriter::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeRequest {
    mode: BmpMode,
}

impl EncodeRequest {
    pub fn new(mode: BmpMode) -> Self {
        Self { mode }
    }

    /// Uncompressed 24-bit BMP.
    pub fn bmp24() -> Self {
        Self::new(BmpMode::Bgr24)
    }

    /// Palette BMP with a gray (or black/white at 1 bpp) color table.
    pub fn indexed(bits: ColorBit, compression: Compression) -> Self {
        Self::new(BmpMode::Indexed { bits, compression })
    }

    /// Shorthand for `indexed(bits, Compression::Rgb)`.
    pub fn gray(bits: ColorBit) -> Self {
        Self::indexed(bits, Compression::Rgb)
    }

    /// BI_BITFIELDS BMP at 16 or 32 bpp.
    pub fn bitfields(bits: ColorBit, masks: ChannelMasks) -> Self {
        Self::new(BmpMode::Bitfields { bits, masks })
    }

    /// 32-bit X8R8G8B8 bitfields.
    pub fn rgb888() -> Self {
        Self::bitfields(ColorBit::Bit32, ChannelMasks::RGB888)
    }

    pub fn mode(&self) -> BmpMode {
        self.mode
    }

    /// Check the bit depth / compression combination without encoding.
    pub fn validate(&self) -> Result<(), BitmapError> {
        match self.mode {
            BmpMode::Bgr24 => Ok(()),
            BmpMode::Indexed { bits, compression } => encode::check_indexed(bits, compression),
            BmpMode::Bitfields { bits, .. } => bitfields::check_depth(bits),
        }
    }

    /// [`validate`](Self::validate), then check that a `width x height`
    /// file fits the header's 32-bit size fields.
    ///
    /// Indexed modes are sized with a full palette, since the real palette
    /// length is only known after indexing.
    pub fn validate_for(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        self.validate()?;
        let (bits, extra) = match self.mode {
            BmpMode::Bgr24 => (ColorBit::Bit24, 0),
            BmpMode::Indexed { bits, .. } => (bits, (1 << bits.bits()) * PALETTE_ENTRY_SIZE),
            BmpMode::Bitfields { bits, .. } => (bits, MASKS_SIZE),
        };
        Layout::new(width, height, bits.bits(), extra).map(|_| ())
    }

    /// Encode into a new byte vector.
    pub fn encode(&self, buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::new();
        self.stream(buffer, &mut out, &stop)?;
        Ok(out)
    }

    /// Stream into any writer. Nothing is written if validation fails.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(
        &self,
        buffer: &PixelBuffer,
        writer: W,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        self.validate_for(buffer.width(), buffer.height())?;
        let mut sink = crate::sink::IoSink(writer);
        self.stream(buffer, &mut sink, &stop)
    }

    /// Write a BMP file at `path`.
    ///
    /// An existing file is deleted first and missing parent directories are
    /// created. Validation happens before the filesystem is touched. If
    /// `stop` cancels the encode, the partial file is removed. Other errors
    /// may leave a partial file. The replacement is not atomic; write to a
    /// temporary path and rename if that matters.
    #[cfg(feature = "std")]
    pub fn save(
        &self,
        buffer: &PixelBuffer,
        path: impl AsRef<std::path::Path>,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        use std::io::Write as _;

        let path = path.as_ref();
        self.validate_for(buffer.width(), buffer.height())?;
        crate::sink::prepare_destination(path)?;
        log::debug!("saving {:?} to {}", self.mode, path.display());
        let file = std::fs::File::create(path)?;
        let mut sink = crate::sink::IoSink(std::io::BufWriter::new(file));
        match self.stream(buffer, &mut sink, &stop) {
            Ok(()) => {}
            Err(e @ BitmapError::Cancelled(_)) => {
                drop(sink);
                log::debug!("save cancelled, removing {}", path.display());
                std::fs::remove_file(path)?;
                return Err(e);
            }
            Err(e) => return Err(e),
        }
        sink.0.flush()?;
        Ok(())
    }

    fn stream<S: ByteSink>(
        &self,
        buffer: &PixelBuffer,
        sink: &mut S,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        match self.mode {
            BmpMode::Bgr24 => encode::encode_24bit(buffer, sink, stop),
            BmpMode::Indexed { bits, compression } => {
                encode::encode_indexed(buffer, bits, compression, sink, stop)
            }
            BmpMode::Bitfields { bits, masks } => {
                encode::encode_bitfields(buffer, bits, masks, sink, stop)
            }
        }
    }
}
