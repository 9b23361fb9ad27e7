/// Linear RGB color for the tile material, each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for TileColor {
    fn default() -> Self {
        // #57B257
        Self::from_rgb8(0x57, 0xB2, 0x57)
    }
}

impl TileColor {
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid tile color {s:?}; expected #RRGGBB"));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}
