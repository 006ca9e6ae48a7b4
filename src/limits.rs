use crate::error::BitmapError;

/// Resource limits checked before a [`PixelBuffer`](crate::PixelBuffer) is allocated.
///
/// All fields default to `None` (no limit).
///
/// ```
/// use zenbmpwriter::{Limits, PixelBuffer};
///
/// let limits = Limits::default().with_max_pixels(1 << 20);
/// assert!(PixelBuffer::with_limits(2048, 2048, &limits).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the BGR backing store, in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub fn with_max_width(mut self, max: u64) -> Self {
        self.max_width = Some(max);
        self
    }

    pub fn with_max_height(mut self, max: u64) -> Self {
        self.max_height = Some(max);
        self
    }

    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    pub fn with_max_memory_bytes(mut self, max: u64) -> Self {
        self.max_memory_bytes = Some(max);
        self
    }

    /// Check a `width x height` buffer needing `bytes` of storage.
    pub(crate) fn check_buffer(&self, width: u32, height: u32, bytes: usize) -> Result<(), BitmapError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            BitmapError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };
        if let Some(max) = self.max_width.filter(|&m| u64::from(width) > m) {
            return Err(exceeded("width", width.into(), max));
        }
        if let Some(max) = self.max_height.filter(|&m| u64::from(height) > m) {
            return Err(exceeded("height", height.into(), max));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(exceeded("pixel count", pixels, max));
        }
        if let Some(max) = self.max_memory_bytes.filter(|&m| bytes as u64 > m) {
            return Err(exceeded("buffer size", bytes as u64, max));
        }
        Ok(())
    }
}
