use crate::color::Color;
use crate::error::{Result, SurfaceError};
use crate::palette::PALETTE_SIZE;

// ============================================================================
// Pixel Format
// ============================================================================

/// Layout of a single pixel: depth, channel masks and, for 8-bit formats,
/// the palette the indices refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    bits_per_pixel: u8,
    bytes_per_pixel: u8,
    rmask: u32,
    gmask: u32,
    bmask: u32,
    amask: u32,
    palette: Option<Vec<Color>>,
}

impl PixelFormat {
    /// Build a format from a depth and channel masks.
    /// 8-bit formats always get a 256-entry black palette.
    pub fn new(depth: u8, rmask: u32, gmask: u32, bmask: u32, amask: u32) -> Result<Self> {
        let bytes_per_pixel = match depth {
            8 => 1,
            15 | 16 => 2,
            24 => 3,
            32 => 4,
            other => return Err(SurfaceError::UnsupportedFormat(other)),
        };
        let palette = (depth == 8).then(|| vec![Color::BLACK; PALETTE_SIZE]);
        Ok(Self {
            bits_per_pixel: depth,
            bytes_per_pixel,
            rmask,
            gmask,
            bmask,
            amask,
            palette,
        })
    }

    /// 16-bit 5/6/5, the layout `pack_rgb565` produces
    pub fn rgb565() -> Self {
        Self {
            bits_per_pixel: 16,
            bytes_per_pixel: 2,
            rmask: 0xF800,
            gmask: 0x07E0,
            bmask: 0x001F,
            amask: 0,
            palette: None,
        }
    }

    /// 32-bit 0x00RRGGBB
    pub fn xrgb8888() -> Self {
        Self {
            bits_per_pixel: 32,
            bytes_per_pixel: 4,
            rmask: 0x00FF0000,
            gmask: 0x0000FF00,
            bmask: 0x000000FF,
            amask: 0,
            palette: None,
        }
    }

    /// 8-bit palette indices
    pub fn indexed8() -> Self {
        Self {
            bits_per_pixel: 8,
            bytes_per_pixel: 1,
            rmask: 0,
            gmask: 0,
            bmask: 0,
            amask: 0,
            palette: Some(vec![Color::BLACK; PALETTE_SIZE]),
        }
    }

    #[inline]
    pub fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel as usize
    }

    /// (rmask, gmask, bmask, amask)
    #[inline]
    pub fn masks(&self) -> (u32, u32, u32, u32) {
        (self.rmask, self.gmask, self.bmask, self.amask)
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.palette.is_some()
    }

    pub fn palette(&self) -> Option<&[Color]> {
        self.palette.as_deref()
    }

    pub fn palette_mut(&mut self) -> Option<&mut [Color]> {
        self.palette.as_deref_mut()
    }

    /// Map an RGB triple to a pixel value in this format.
    /// Indexed formats return the index of the closest palette entry.
    pub fn map_rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        if let Some(palette) = &self.palette {
            return nearest_index(palette, r, g, b) as u32;
        }
        scale_into_mask(r, self.rmask)
            | scale_into_mask(g, self.gmask)
            | scale_into_mask(b, self.bmask)
            | self.amask
    }

    /// Decode a pixel value of this format back into a color
    pub fn get_rgb(&self, pixel: u32) -> Color {
        if let Some(palette) = &self.palette {
            return palette.get(pixel as usize).copied().unwrap_or_default();
        }
        Color::rgb(
            scale_from_mask(pixel, self.rmask),
            scale_from_mask(pixel, self.gmask),
            scale_from_mask(pixel, self.bmask),
        )
    }
}

/// Place an 8-bit channel into a mask. Narrow fields keep the channel's
/// top bits, wider fields get it in their top 8 bits.
#[inline]
fn scale_into_mask(channel: u8, mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let bits = mask.count_ones();
    let value = if bits >= 8 {
        (channel as u32) << (bits - 8)
    } else {
        channel as u32 >> (8 - bits)
    };
    (value << shift) & mask
}

/// Pull a channel out of a mask and scale it to 8 bits
#[inline]
fn scale_from_mask(pixel: u32, mask: u32) -> u8 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let bits = mask.count_ones();
    let v = (pixel & mask) >> shift;
    if bits >= 8 {
        return (v >> (bits - 8)) as u8;
    }
    // Replicate the top bits into the vacated low bits
    let v = v << (8 - bits);
    (v | (v >> bits)) as u8
}

/// Palette index with the smallest squared RGB distance
fn nearest_index(palette: &[Color], r: u8, g: u8, b: u8) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, c) in palette.iter().enumerate() {
        let dr = c.r as i32 - r as i32;
        let dg = c.g as i32 - g as i32;
        let db = c.b as i32 - b as i32;
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best = i;
            best_dist = dist;
            if dist == 0 {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::pack_rgb565;

    #[test]
    fn test_rejects_unknown_depth() {
        assert_eq!(
            PixelFormat::new(12, 0, 0, 0, 0),
            Err(SurfaceError::UnsupportedFormat(12))
        );
    }

    #[test]
    fn test_eight_bit_gets_palette() {
        let fmt = PixelFormat::new(8, 0, 0, 0, 0).unwrap();
        assert!(fmt.is_indexed());
        assert_eq!(fmt.palette().unwrap().len(), PALETTE_SIZE);
        assert!(!PixelFormat::rgb565().is_indexed());
    }

    #[test]
    fn test_map_rgb_565_agrees_with_pack() {
        let fmt = PixelFormat::rgb565();
        for &(r, g, b) in &[(0xFF, 0xFF, 0xFF), (0x12, 0x34, 0x56), (0x80, 0x00, 0x7F)] {
            assert_eq!(fmt.map_rgb(r, g, b), pack_rgb565(r, g, b) as u32);
        }
    }

    #[test]
    fn test_map_rgb_8888() {
        let fmt = PixelFormat::xrgb8888();
        assert_eq!(fmt.map_rgb(0x12, 0x34, 0x56), 0x00123456);
        assert_eq!(fmt.get_rgb(0x00123456), Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_map_rgb_indexed_finds_nearest() {
        let mut fmt = PixelFormat::indexed8();
        let pal = fmt.palette_mut().unwrap();
        pal[3] = Color::rgb(250, 0, 0);
        pal[7] = Color::rgb(0, 0, 250);
        assert_eq!(fmt.map_rgb(255, 10, 0), 3);
        assert_eq!(fmt.map_rgb(0, 0, 200), 7);
        assert_eq!(fmt.get_rgb(7), Color::rgb(0, 0, 250));
    }

    #[test]
    fn test_ten_bit_channels_use_full_range() {
        let fmt = PixelFormat::new(32, 0x3FF0_0000, 0x000F_FC00, 0x0000_03FF, 0xC000_0000).unwrap();
        assert_eq!(fmt.map_rgb(0xFF, 0, 0), 0x3FC0_0000 | 0xC000_0000);
        assert_eq!(fmt.map_rgb(0, 0xFF, 0), 0x000F_F000 | 0xC000_0000);
        assert_eq!(fmt.map_rgb(0, 0, 0x80), 0x0000_0200 | 0xC000_0000);
        assert_eq!(fmt.get_rgb(fmt.map_rgb(0xFF, 0x12, 0x80)), Color::rgb(0xFF, 0x12, 0x80));
    }
}
