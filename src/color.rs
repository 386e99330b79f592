//! Colors and 16-bit color packing

use serde::{Deserialize, Serialize};

pub const RED_EXPAND: u32 = 3;
pub const GREEN_EXPAND: u32 = 2;
pub const BLUE_EXPAND: u32 = 3;

pub const RED_SHIFT: u32 = 11;
pub const GREEN_SHIFT: u32 = 5;
pub const BLUE_SHIFT: u32 = 0;

/// RGB color with a padding byte, laid out like the backend's palette entries
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default)]
    pub unused: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, unused: 0 }
    }

    /// This color packed into 16 bits
    #[inline]
    pub fn packed(&self) -> u16 {
        pack_rgb565(self.r, self.g, self.b)
    }
}

/// Pack 8-bit channels into 16 bits (5/6/5). Low bits are truncated, never rounded.
#[inline]
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r = (r as u32 >> RED_EXPAND) << RED_SHIFT;
    let g = (g as u32 >> GREEN_EXPAND) << GREEN_SHIFT;
    let b = (b as u32 >> BLUE_EXPAND) << BLUE_SHIFT;
    (r | g | b) as u16
}

/// Widen a packed 16-bit color back to 8-bit channels.
/// The top bits are replicated into the low bits so 0x1F maps to 0xFF.
#[inline]
pub fn unpack_rgb565(packed: u16) -> Color {
    let r5 = ((packed >> RED_SHIFT) & 0x1F) as u8;
    let g6 = ((packed >> GREEN_SHIFT) & 0x3F) as u8;
    let b5 = ((packed >> BLUE_SHIFT) & 0x1F) as u8;
    Color::rgb(
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_white_is_all_ones() {
        assert_eq!(pack_rgb565(0xFF, 0xFF, 0xFF), 0xFFFF);
        assert_eq!(pack_rgb565(0xF8, 0xFC, 0xF8), 0xFFFF);
    }

    #[test]
    fn test_pack_truncates_low_bits() {
        assert_eq!(pack_rgb565(0x07, 0x03, 0x07), 0);
        assert_eq!(pack_rgb565(0x08, 0, 0), 1 << 11);
        assert_eq!(pack_rgb565(0, 0x04, 0), 1 << 5);
        assert_eq!(pack_rgb565(0, 0, 0x08), 1);
    }

    #[test]
    fn test_pack_channels_land_in_masks() {
        assert_eq!(pack_rgb565(0xFF, 0, 0), 0xF800);
        assert_eq!(pack_rgb565(0, 0xFF, 0), 0x07E0);
        assert_eq!(pack_rgb565(0, 0, 0xFF), 0x001F);
    }

    #[test]
    fn test_unpack_extremes() {
        assert_eq!(unpack_rgb565(0xFFFF), Color::WHITE);
        assert_eq!(unpack_rgb565(0), Color::BLACK);
        assert_eq!(unpack_rgb565(0xF800), Color::rgb(0xFF, 0, 0));
    }

    #[test]
    fn test_color_packed_matches_free_fn() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.packed(), pack_rgb565(0x12, 0x34, 0x56));
    }
}
