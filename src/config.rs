use std::error::Error;
use std::path::Path;

use serde::Deserialize;
use verdant_field::ElevationParams;
use verdant_grass::GrassConfig;
use verdant_runtime::LiveConfig;
use verdant_tiles::TilesConfig;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub elevation: ElevationParams,
    #[serde(default)]
    pub tiles: TilesConfig,
    #[serde(default)]
    pub grass: GrassConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Planar `(x, z)` start position; feet snap to the ground.
    #[serde(default)]
    pub spawn: [f32; 2],
    #[serde(default = "default_eye_height")]
    pub eye_height: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_eye_height() -> f32 {
    1.6
}
fn default_speed() -> f32 {
    4.0
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 0.0],
            eye_height: default_eye_height(),
            speed: default_speed(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.elevation.validate()?;
        self.tiles.validate()?;
        self.grass.validate()?;
        let v = &self.viewer;
        if !(v.spawn[0].is_finite() && v.spawn[1].is_finite()) {
            return Err("viewer.spawn must be finite".into());
        }
        if !(v.eye_height.is_finite() && v.eye_height >= 0.0) {
            return Err(format!("viewer.eye_height must be >= 0 (got {})", v.eye_height));
        }
        if !(v.speed.is_finite() && v.speed >= 0.0) {
            return Err(format!("viewer.speed must be >= 0 (got {})", v.speed));
        }
        Ok(())
    }

    /// The part of the config that can change without a restart.
    pub fn live(&self) -> Result<LiveConfig, String> {
        Ok(LiveConfig {
            elevation: self.elevation.clone(),
            tile_color: self.tiles.tile_color()?,
        })
    }
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    let s = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Defaults when `path` does not exist; a present but broken file is an error.
pub fn load_or_default(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    if path.exists() {
        let cfg = load_config_from_path(path)?;
        log::info!(target: "config", "loaded config from {}", path.display());
        Ok(cfg)
    } else {
        log::info!(target: "config", "{} not found; using defaults", path.display());
        Ok(AppConfig::default())
    }
}
