//! BMP encoder internals: header serialization, row layout, palette
//! indexing, bitfield packing, and the streaming encoders.
//!
//! Use [`crate::EncodeRequest`] or [`crate::BitmapWriter`].

pub(crate) mod bitfields;
pub(crate) mod encode;
pub(crate) mod header;
pub(crate) mod layout;
pub(crate) mod palette;

/// Bits per pixel of an encoded BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ColorBit {
    Bit1 = 1,
    Bit4 = 4,
    Bit8 = 8,
    Bit16 = 16,
    Bit24 = 24,
    Bit32 = 32,
}

impl ColorBit {
    pub fn bits(self) -> u16 {
        self as u16
    }

    /// Map a raw bit count to a supported depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        Some(match bits {
            1 => Self::Bit1,
            4 => Self::Bit4,
            8 => Self::Bit8,
            16 => Self::Bit16,
            24 => Self::Bit24,
            32 => Self::Bit32,
            _ => return None,
        })
    }
}

/// Value of the info header's compression field.
///
/// The encoder writes `Rle8`/`Rle4` only as labels on indexed output; the
/// pixel rows it produces are always the uncompressed packed form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Compression {
    #[default]
    Rgb = 0,
    Rle8 = 1,
    Rle4 = 2,
    Bitfields = 3,
}

impl Compression {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Channel masks for [`Compression::Bitfields`] output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl ChannelMasks {
    /// 8 bits per channel, X8R8G8B8.
    pub const RGB888: Self = Self::new(0x00FF_0000, 0x0000_FF00, 0x0000_00FF);
    /// 5 bits per channel, X1R5G5B5.
    pub const RGB555: Self = Self::new(0x7C00, 0x03E0, 0x001F);
    /// R5 G6 B5.
    pub const RGB565: Self = Self::new(0xF800, 0x07E0, 0x001F);

    pub const fn new(red: u32, green: u32, blue: u32) -> Self {
        Self { red, green, blue }
    }
}
