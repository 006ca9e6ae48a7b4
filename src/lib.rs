//! # zenbmpwriter
//!
//! In-memory BGR pixel buffer that encodes to Windows Bitmap (BMP).
//!
//! ## Output Modes
//!
//! - **24-bit** — uncompressed BGR, rows padded to 4 bytes
//! - **1/4/8-bit indexed** — pixels reduced to Rec. 709 luma (black/white at
//!   1 bpp, 16 gray levels at 4 bpp, 256 at 8 bpp) with a first-seen palette
//! - **16/32-bit bitfields** — caller-supplied channel masks (`BI_BITFIELDS`)
//!
//! All output is bottom-up (positive height). `Rle8`/`Rle4` may be requested
//! for indexed output to label the header, but the rows themselves are never
//! run-length encoded.
//!
//! ## Non-Goals
//!
//! - Decoding BMP files
//! - RLE compression
//! - Alpha channels, color management, multi-frame images
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpwriter::{BitmapWriter, ColorBit, Compression};
//!
//! let mut writer = BitmapWriter::new(640, 480)?;
//! for y in 0..480 {
//!     for x in 0..640 {
//!         writer.set_pixel(x, y, (x / 3) as u8, (y / 2) as u8, 128)?;
//!     }
//! }
//! writer.save_uncompressed_24bit("out/color.bmp")?;
//! writer.save_quantized_palette("out/gray.bmp", ColorBit::Bit8, Compression::Rgb)?;
//! writer.save_bit_field_masks("out/565.bmp", ColorBit::Bit16, 0xF800, 0x07E0, 0x001F)?;
//! writer.save_standard_rgb888("out/888.bmp")?;
//! # Ok::<(), zenbmpwriter::BitmapError>(())
//! ```
//!
//! Finer control (in-memory output, arbitrary writers, cancellation) goes
//! through [`EncodeRequest`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;
mod sink;

pub mod bmp;

mod encode;
mod writer;

// Re-exports
pub use bmp::{ChannelMasks, ColorBit, Compression};
pub use encode::{BmpMode, EncodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::PixelBuffer;
pub use writer::BitmapWriter;
