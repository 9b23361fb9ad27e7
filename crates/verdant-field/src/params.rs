use serde::Deserialize;

use verdant_geom::Vec2;

/// How the raw octave sum is turned into a height.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Shaping {
    /// Plain three-octave sum.
    Raw,
    /// `sign(2s) * (2s)^2`: sharper peaks, flatter valleys.
    #[default]
    Sharpened,
}

/// Tunables read by every elevation query. One snapshot is shared by all
/// call sites within a frame.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ElevationParams {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_frequency_base")]
    pub frequency_base: f32,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    #[serde(default)]
    pub offset: [f32; 2],
    #[serde(default)]
    pub shaping: Shaping,
}

fn default_seed() -> i32 {
    1337
}
fn default_frequency_base() -> f32 {
    0.15
}
fn default_zoom() -> f32 {
    0.7
}

impl Default for ElevationParams {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            frequency_base: default_frequency_base(),
            zoom: default_zoom(),
            offset: [0.0, 0.0],
            shaping: Shaping::default(),
        }
    }
}

impl ElevationParams {
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset[0], self.offset[1])
    }

    /// Rejects non-finite values. Ranges are deliberately not clamped here:
    /// a negative zoom or zero frequency yields odd terrain, not a fault.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("frequency_base", self.frequency_base),
            ("zoom", self.zoom),
            ("offset[0]", self.offset[0]),
            ("offset[1]", self.offset[1]),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(format!("elevation.{name} must be finite (got {v})"));
            }
        }
        Ok(())
    }
}
