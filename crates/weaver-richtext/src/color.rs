//! Color values passed to the runtime's color commands.

use std::fmt;

/// An sRGB color. The runtime only understands `#RRGGBB`, so alpha is kept
/// for the host's benefit but dropped when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Unpack from RGBA u32 (packed as 0xRRGGBBAA).
    pub const fn from_rgba_u32(color: u32) -> Self {
        Self {
            r: ((color >> 24) & 0xFF) as u8,
            g: ((color >> 16) & 0xFF) as u8,
            b: ((color >> 8) & 0xFF) as u8,
            a: (color & 0xFF) as u8,
        }
    }

    /// `#RRGGBB` form used inside color commands.
    pub fn hex(&self) -> String {
        self.to_string()
    }

    /// CSS `rgba()` string, for hosts that style their own chrome to match.
    pub fn to_css_rgba(&self) -> String {
        let a = self.a as f32 / 255.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Color::rgb(255, 0, 0).hex(), "#FF0000");
        assert_eq!(Color::rgb(0x0a, 0xbc, 0x01).hex(), "#0ABC01");
        assert_eq!(Color::WHITE.to_string(), "#FFFFFF");
        let c = Color::from_rgba_u32(0x12345678);
        assert_eq!(c.hex(), c.to_string());
    }

    #[test]
    fn test_from_rgba_u32_drops_alpha_in_hex() {
        let c = Color::from_rgba_u32(0x00FF0080);
        assert_eq!(c.a, 0x80);
        assert_eq!(c.hex(), "#00FF00");
        assert_eq!(Color::rgb(0, 255, 0).to_css_rgba(), "rgba(0, 255, 0, 1)");
    }
}
