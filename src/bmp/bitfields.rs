//! Channel mask decomposition and 8-bit sample scaling for BI_BITFIELDS.

use super::{ChannelMasks, ColorBit};
use crate::error::BitmapError;

/// A channel mask split into its low bit, all-ones field value and position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MaskField {
    /// Lowest set bit of the mask.
    pub divisor: u32,
    /// `mask / divisor`; the field's maximum value.
    pub max_value: u32,
    /// `log2(divisor)`
    pub shift: u32,
}

/// Decompose `mask`. A zero mask yields an all-zero field.
pub(crate) fn decompose(mask: u32) -> MaskField {
    if mask == 0 {
        return MaskField::default();
    }
    let divisor = mask & mask.wrapping_neg();
    MaskField {
        divisor,
        max_value: mask / divisor,
        shift: divisor.trailing_zeros(),
    }
}

/// Scale an 8-bit sample to `0..=max_value`, rounding down.
pub(crate) fn scale(sample: u8, max_value: u32) -> u32 {
    if max_value == 0 {
        return 0;
    }
    (f64::from(sample) / 255.0 * f64::from(max_value)) as u32
}

impl MaskField {
    /// `sample` scaled and moved into the mask's bit position.
    fn place(self, sample: u8) -> u32 {
        // scale() <= max_value, and max_value << shift == mask
        scale(sample, self.max_value) << self.shift
    }
}

/// Packs BGR samples into one pixel word. Overlapping or empty masks are
/// accepted; their fields simply OR together.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BitfieldPacker {
    red: MaskField,
    green: MaskField,
    blue: MaskField,
}

impl BitfieldPacker {
    pub(crate) fn new(masks: ChannelMasks) -> Self {
        Self {
            red: decompose(masks.red),
            green: decompose(masks.green),
            blue: decompose(masks.blue),
        }
    }

    pub(crate) fn pack(&self, blue: u8, green: u8, red: u8) -> u32 {
        self.red.place(red) | self.green.place(green) | self.blue.place(blue)
    }
}

/// Only 16 and 32 bits per pixel may carry bitfields.
pub(crate) fn check_depth(bits: ColorBit) -> Result<(), BitmapError> {
    match bits {
        ColorBit::Bit16 | ColorBit::Bit32 => Ok(()),
        other => Err(BitmapError::UnsupportedVariant(alloc::format!(
            "compression not possible at this bit depth ({} bpp)",
            other.bits()
        ))),
    }
}
