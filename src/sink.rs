//! Destinations the encoder streams bytes into.

use alloc::vec::Vec;

use crate::error::BitmapError;

/// Sequential, append-only byte destination.
pub(crate) trait ByteSink {
    fn put(&mut self, bytes: &[u8]) -> Result<(), BitmapError>;

    fn put_zeros(&mut self, n: usize) -> Result<(), BitmapError> {
        const ZEROS: [u8; 4] = [0; 4];
        let mut left = n;
        while left > 0 {
            let k = left.min(ZEROS.len());
            self.put(&ZEROS[..k])?;
            left -= k;
        }
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn put_zeros(&mut self, n: usize) -> Result<(), BitmapError> {
        self.extend(core::iter::repeat_n(0u8, n));
        Ok(())
    }
}

/// Adapts any [`std::io::Write`].
#[cfg(feature = "std")]
pub(crate) struct IoSink<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> ByteSink for IoSink<W> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.0.write_all(bytes)?;
        Ok(())
    }
}

/// Remove any existing file at `path` and create its parent directory.
///
/// Deletion is not atomic with the later write: a failure after this point
/// leaves no file (or a partial one) rather than the old contents.
#[cfg(feature = "std")]
pub(crate) fn prepare_destination(path: &std::path::Path) -> Result<(), BitmapError> {
    if path.exists() {
        log::trace!("removing existing {}", path.display());
        std::fs::remove_file(path)?;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            log::trace!("creating directory {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
