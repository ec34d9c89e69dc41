#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8, // Red component (0 - 255)
    pub g: u8, // Green component (0 - 255)
    pub b: u8, // Blue component (0 - 255)
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn hex_char_to_u8(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    }

    /// Convert two hex characters to a single byte.
    const fn hex_pair_to_u8(high: u8, low: u8) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Only for the predefined constants below, invalid digits read as 0.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        Self {
            r: Self::hex_pair_to_u8(bytes[offset], bytes[offset + 1]),
            g: Self::hex_pair_to_u8(bytes[offset + 2], bytes[offset + 3]),
            b: Self::hex_pair_to_u8(bytes[offset + 4], bytes[offset + 5]),
        }
    }

    /// Linear interpolation between `self` (t = 0) and `end` (t = 1).
    /// `t` is clamped to [0, 1].
    pub fn lerp(&self, end: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: channel(self.r, end.r),
            g: channel(self.g, end.g),
            b: channel(self.b, end.b),
        }
    }

    /// 0x00RRGGBB, the pixel layout minifb expects.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const WHITE: Color = Color::hex("FFFFFF");
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_colors_decode_hex() {
        assert_eq!(Color::BLACK, Color::new(0, 0, 0));
        assert_eq!(Color::WHITE, Color::new(255, 255, 255));
        assert_eq!(Color::WHITE.to_u32(), 0x00FF_FFFF);
        assert_eq!(Color::hex("#1A2b3C"), Color::new(0x1A, 0x2B, 0x3C));
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let (a, b) = (Color::BLACK, Color::WHITE);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Color::new(128, 128, 128));
        // out of range t is clamped
        assert_eq!(a.lerp(&b, 4.0), b);
        assert_eq!(a.lerp(&b, -1.0), a);
    }
}
