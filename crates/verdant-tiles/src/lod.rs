use serde::Deserialize;

/// Tiles closer than `max_distance` (world units, from the grid center) use
/// `resolution` segments per side.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct LodBand {
    pub max_distance: f32,
    pub resolution: u32,
}

/// Ordered distance bands plus the resolution used beyond the last band.
#[derive(Clone, Debug, PartialEq)]
pub struct LodBands {
    bands: Vec<LodBand>,
    fallback: u32,
}

pub(crate) const DEFAULT_FALLBACK: u32 = 32;

/// 8 -> 128, 16 -> 96, 24 -> 64; everything further uses [`DEFAULT_FALLBACK`].
pub(crate) fn default_bands() -> Vec<LodBand> {
    [(8.0, 128), (16.0, 96), (24.0, 64)]
        .into_iter()
        .map(|(max_distance, resolution)| LodBand {
            max_distance,
            resolution,
        })
        .collect()
}

impl Default for LodBands {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            fallback: DEFAULT_FALLBACK,
        }
    }
}

impl LodBands {
    pub fn new(bands: Vec<LodBand>, fallback: u32) -> Result<Self, String> {
        let out = Self { bands, fallback };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bands.is_empty() {
            return Err("at least one LOD band is required".into());
        }
        if self.fallback == 0 {
            return Err("fallback resolution must be at least 1".into());
        }
        let mut prev = f32::NEG_INFINITY;
        for band in &self.bands {
            if !band.max_distance.is_finite() || band.max_distance <= prev {
                return Err(format!(
                    "band distances must be finite and strictly ascending (got {} after {})",
                    band.max_distance, prev
                ));
            }
            if band.resolution == 0 {
                return Err(format!(
                    "band below {} has zero resolution",
                    band.max_distance
                ));
            }
            prev = band.max_distance;
        }
        Ok(())
    }

    /// First band whose bound exceeds `distance`, else the fallback.
    pub fn select(&self, distance: f32) -> u32 {
        self.bands
            .iter()
            .find(|b| distance < b.max_distance)
            .map(|b| b.resolution)
            .unwrap_or(self.fallback)
    }
}
