//! 8-bit index to 16-bit color lookup table

use std::ops::Index;

use crate::color::{pack_rgb565, Color};

pub const PALETTE_SIZE: usize = 256;

/// 256 packed 16-bit colors, rebuilt on every palette or fill-color change.
///
/// Both rebuilds write one value into every entry: `set_palette` packs the
/// first supplied color only, and `set_fill_color` stores the low 16 bits of
/// the fill color. Frontends that fed per-index data through this table get
/// the same single-color result they always did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    entries: [u16; PALETTE_SIZE],
}

impl PaletteTable {
    pub fn new() -> Self {
        Self {
            entries: [0; PALETTE_SIZE],
        }
    }

    /// Rebuild from a palette update. An empty update leaves the table as is.
    pub fn set_palette(&mut self, colors: &[Color]) {
        let Some(first) = colors.first() else {
            return;
        };
        let packed = pack_rgb565(first.r, first.g, first.b);
        self.entries.fill(packed);
    }

    /// Rebuild for a fill with a 32-bit color (truncated to 16 bits)
    pub fn set_fill_color(&mut self, color: u32) {
        self.entries.fill(color as u16);
    }

    #[inline]
    pub fn get(&self, index: u8) -> u16 {
        self.entries[index as usize]
    }

    #[inline]
    pub fn entries(&self) -> &[u16; PALETTE_SIZE] {
        &self.entries
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for PaletteTable {
    type Output = u16;

    fn index(&self, index: u8) -> &u16 {
        &self.entries[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_black() {
        let table = PaletteTable::new();
        assert!(table.entries().iter().all(|&e| e == 0));
    }

    #[test]
    fn test_set_palette_uses_first_color_everywhere() {
        let mut table = PaletteTable::new();
        let colors = [
            Color::rgb(0xFF, 0, 0),
            Color::rgb(0, 0xFF, 0),
            Color::rgb(0, 0, 0xFF),
        ];
        table.set_palette(&colors);
        assert!(table.entries().iter().all(|&e| e == 0xF800));
        assert_eq!(table[1], 0xF800);
        assert_eq!(table.get(255), 0xF800);
    }

    #[test]
    fn test_set_palette_empty_keeps_table() {
        let mut table = PaletteTable::new();
        table.set_fill_color(0x1234);
        table.set_palette(&[]);
        assert_eq!(table[0], 0x1234);
    }

    #[test]
    fn test_fill_color_truncates_to_16_bits() {
        let mut table = PaletteTable::new();
        table.set_fill_color(0xAABB_CCDD);
        assert!(table.entries().iter().all(|&e| e == 0xCCDD));
    }
}
