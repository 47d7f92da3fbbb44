//! 24-bit RGB color value

use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBB` color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Create a color, discarding any bits above 24
    #[inline]
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Parse a hexadecimal color such as `ff0000`, `#ff0000` or `0xff0000`
    pub fn from_hex(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text
            .strip_prefix('#')
            .or_else(|| text.strip_prefix("0x"))
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.is_empty() || digits.len() > 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::new)
    }

    /// Red, green and blue channels in [0, 1]
    pub fn to_rgb_f32(self) -> [f32; 3] {
        let r = (self.0 >> 16) & 0xff;
        let g = (self.0 >> 8) & 0xff;
        let b = self.0 & 0xff;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// CSS hex notation, e.g. `#ff0000`
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Self::new(rgb)
    }
}
