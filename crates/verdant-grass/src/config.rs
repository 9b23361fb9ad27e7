use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GrassConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_scale_min")]
    pub scale_min: f32,
    #[serde(default = "default_scale_max")]
    pub scale_max: f32,
}

fn default_count() -> usize {
    4096
}
fn default_radius() -> f32 {
    6.0
}
fn default_seed() -> u64 {
    7
}
fn default_scale_min() -> f32 {
    0.4
}
fn default_scale_max() -> f32 {
    0.6
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            radius: default_radius(),
            seed: default_seed(),
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
        }
    }
}

impl GrassConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(format!(
                "grass.radius must be finite and >= 0 (got {})",
                self.radius
            ));
        }
        if !(self.scale_min.is_finite() && self.scale_max.is_finite())
            || self.scale_min > self.scale_max
        {
            return Err(format!(
                "grass scale range [{}, {}) is empty or not finite",
                self.scale_min, self.scale_max
            ));
        }
        Ok(())
    }
}
