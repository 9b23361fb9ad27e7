use serde::Deserialize;

use crate::color::TileColor;
use crate::lod::{self, LodBand, LodBands};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TilesConfig {
    #[serde(default = "default_chunk_count")]
    pub chunk_count: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_bands")]
    pub bands: Vec<LodBand>,
    #[serde(default = "default_fallback_resolution")]
    pub fallback_resolution: u32,
}

fn default_chunk_count() -> u32 {
    7
}
fn default_tile_size() -> f32 {
    8.0
}
fn default_color() -> String {
    "#57B257".into()
}
fn default_bands() -> Vec<LodBand> {
    lod::default_bands()
}
fn default_fallback_resolution() -> u32 {
    lod::DEFAULT_FALLBACK
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            chunk_count: default_chunk_count(),
            tile_size: default_tile_size(),
            color: default_color(),
            bands: default_bands(),
            fallback_resolution: default_fallback_resolution(),
        }
    }
}

impl TilesConfig {
    pub fn lod_bands(&self) -> Result<LodBands, String> {
        LodBands::new(self.bands.clone(), self.fallback_resolution)
    }

    pub fn tile_color(&self) -> Result<TileColor, String> {
        TileColor::from_hex(&self.color)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_count == 0 || self.chunk_count % 2 == 0 {
            return Err(format!(
                "tiles.chunk_count must be odd so one tile sits under the viewer (got {})",
                self.chunk_count
            ));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(format!(
                "tiles.tile_size must be positive (got {})",
                self.tile_size
            ));
        }
        self.lod_bands()?;
        self.tile_color()?;
        Ok(())
    }
}
