use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::limits::Limits;

/// Bytes per stored pixel (B, G, R).
pub(crate) const BGR_BYTES: usize = 3;

/// Owned image of 8-bit BGR pixels.
///
/// Pixel `(x, y)` lives at byte offset `(y * width + x) * 3`, stored in
/// BMP's native blue, green, red order. Row 0 is the top scanline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bgr: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed (black) buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::with_limits(width, height, &Limits::default())
    }

    /// Allocate a zeroed buffer after checking `limits`.
    pub fn with_limits(width: u32, height: u32, limits: &Limits) -> Result<Self, BitmapError> {
        let bytes = checked_len(width, height)?;
        limits.check_buffer(width, height, bytes)?;

        let mut bgr = Vec::new();
        bgr.try_reserve_exact(bytes)
            .map_err(|_| BitmapError::AllocationFailed { bytes })?;
        bgr.resize(bytes, 0);
        Ok(Self { width, height, bgr })
    }

    /// Adopt an existing BGR byte vector of exactly `width * height * 3` bytes.
    pub fn from_bgr(width: u32, height: u32, bgr: Vec<u8>) -> Result<Self, BitmapError> {
        let needed = checked_len(width, height)?;
        if bgr.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: bgr.len(),
            });
        }
        Ok(Self { width, height, bgr })
    }

    /// Copy an [`imgref::ImgRef`] of RGB pixels (any stride) into a new buffer.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB8>) -> Result<Self, BitmapError> {
        let width = u32::try_from(img.width()).unwrap_or(u32::MAX);
        let height = u32::try_from(img.height()).unwrap_or(u32::MAX);
        let mut buf = Self::new(width, height)?;
        for (dst, src) in buf.bgr.chunks_exact_mut(img.width() * BGR_BYTES).zip(img.rows()) {
            for (d, px) in dst.chunks_exact_mut(BGR_BYTES).zip(src) {
                d.copy_from_slice(&[px.b, px.g, px.r]);
            }
        }
        Ok(buf)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read pixel `(x, y)` as `(red, green, blue)`.
    pub fn get(&self, x: u32, y: u32) -> Result<(u8, u8, u8), BitmapError> {
        let off = self.offset(x, y)?;
        Ok((self.bgr[off + 2], self.bgr[off + 1], self.bgr[off]))
    }

    /// Overwrite pixel `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8) -> Result<(), BitmapError> {
        let off = self.offset(x, y)?;
        self.bgr[off..off + BGR_BYTES].copy_from_slice(&[blue, green, red]);
        Ok(())
    }

    #[cfg(feature = "rgb")]
    pub fn get_rgb(&self, x: u32, y: u32) -> Result<rgb::RGB8, BitmapError> {
        let (r, g, b) = self.get(x, y)?;
        Ok(rgb::RGB8::new(r, g, b))
    }

    #[cfg(feature = "rgb")]
    pub fn set_rgb(&mut self, x: u32, y: u32, px: rgb::RGB8) -> Result<(), BitmapError> {
        self.set(x, y, px.r, px.g, px.b)
    }

    /// Set every pixel to one color.
    pub fn fill(&mut self, red: u8, green: u8, blue: u8) {
        for px in self.bgr.chunks_exact_mut(BGR_BYTES) {
            px.copy_from_slice(&[blue, green, red]);
        }
    }

    /// The raw BGR bytes, top row first, no padding.
    pub fn as_bgr(&self) -> &[u8] {
        &self.bgr
    }

    /// BGR bytes of scanline `y`.
    pub fn row(&self, y: u32) -> Result<&[u8], BitmapError> {
        let start = self.offset(0, y)?;
        Ok(&self.bgr[start..start + self.width as usize * BGR_BYTES])
    }

    /// Release the backing store.
    pub fn into_bgr(self) -> Vec<u8> {
        self.bgr
    }

    fn offset(&self, x: u32, y: u32) -> Result<usize, BitmapError> {
        if x >= self.width || y >= self.height {
            return Err(BitmapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * BGR_BYTES)
    }
}

/// Byte length of a `width x height` BGR store.
///
/// Both dimensions must be positive and fit the BMP header's signed fields.
fn checked_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(BGR_BYTES))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_every_pixel() {
        let (w, h) = (7, 5);
        let mut buf = PixelBuffer::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                buf.set(x, y, (x * 30) as u8, (y * 40) as u8, (x + y) as u8).unwrap();
            }
        }
        for y in 0..h {
            for x in 0..w {
                assert_eq!(buf.get(x, y).unwrap(), ((x * 30) as u8, (y * 40) as u8, (x + y) as u8));
            }
        }
    }

    #[test]
    fn storage_is_bgr() {
        let mut buf = PixelBuffer::new(2, 1).unwrap();
        buf.set(1, 0, 0x11, 0x22, 0x33).unwrap();
        assert_eq!(buf.as_bgr(), &[0, 0, 0, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn out_of_bounds() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        assert!(matches!(buf.get(3, 0), Err(BitmapError::OutOfBounds { x: 3, y: 0, .. })));
        assert!(matches!(buf.get(0, 2), Err(BitmapError::OutOfBounds { .. })));
        assert!(matches!(buf.set(5, 5, 1, 2, 3), Err(BitmapError::OutOfBounds { .. })));
        assert!(buf.row(2).is_err());
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(matches!(PixelBuffer::new(0, 4), Err(BitmapError::InvalidDimensions { .. })));
        assert!(matches!(PixelBuffer::new(4, 0), Err(BitmapError::InvalidDimensions { .. })));
        assert!(matches!(
            PixelBuffer::new(u32::MAX, 1),
            Err(BitmapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn from_bgr_checks_length() {
        assert!(PixelBuffer::from_bgr(2, 2, alloc::vec![0; 12]).is_ok());
        assert!(matches!(
            PixelBuffer::from_bgr(2, 2, alloc::vec![0; 11]),
            Err(BitmapError::BufferTooSmall { needed: 12, actual: 11 })
        ));
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb8_accessors() {
        let mut buf = PixelBuffer::new(1, 1).unwrap();
        buf.set_rgb(0, 0, rgb::RGB8::new(9, 8, 7)).unwrap();
        assert_eq!(buf.get_rgb(0, 0).unwrap(), rgb::RGB8::new(9, 8, 7));
        assert_eq!(buf.as_bgr(), &[7, 8, 9]);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn from_imgref_swaps_to_bgr() {
        let px = alloc::vec![rgb::RGB8::new(1, 2, 3), rgb::RGB8::new(4, 5, 6)];
        let buf = PixelBuffer::from_imgref(imgref::ImgRef::new(&px, 1, 2)).unwrap();
        assert_eq!((buf.width(), buf.height()), (1, 2));
        assert_eq!(buf.as_bgr(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn fill_and_row() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.fill(1, 2, 3);
        assert_eq!(buf.row(1).unwrap(), &[3, 2, 1, 3, 2, 1]);
    }
}
