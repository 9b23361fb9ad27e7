use fastnoise_lite::{FastNoiseLite, NoiseType};

use verdant_geom::Vec2;

use crate::params::{ElevationParams, Shaping};

/// Octaves sampled per query. Octave `k` runs at `frequency_base * 2^k` with
/// amplitude `2^-(k+1)`, so the raw sum stays within `±(1 - 2^-OCTAVES)`.
pub const OCTAVES: usize = 3;

/// Sharpening pass: doubles the sum, then squares it keeping the sign.
#[inline]
pub fn shape(sum: f32) -> f32 {
    let v = sum * 2.0;
    v.signum() * v * v
}

/// Deterministic height function built from one parameter snapshot.
///
/// Queries take `&self` and touch no shared state, so a field can be read by
/// any number of call sites within a frame.
pub struct ElevationField {
    noise: FastNoiseLite,
    frequency_base: f32,
    zoom: f32,
    offset: Vec2,
    shaping: Shaping,
}

impl ElevationField {
    pub fn new(params: &ElevationParams) -> Self {
        let mut noise = FastNoiseLite::with_seed(params.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // Octave frequencies are applied to the coordinates directly.
        noise.set_frequency(Some(1.0));
        log::debug!(
            target: "config",
            "elevation field: seed={} freq={} zoom={} offset=({}, {}) shaping={:?}",
            params.seed,
            params.frequency_base,
            params.zoom,
            params.offset[0],
            params.offset[1],
            params.shaping
        );
        Self {
            noise,
            frequency_base: params.frequency_base,
            zoom: params.zoom,
            offset: params.offset(),
            shaping: params.shaping,
        }
    }

    #[inline]
    pub fn shaping(&self) -> Shaping {
        self.shaping
    }

    /// Unshaped fractal sum at world `(x, z)`.
    pub fn octave_sum(&self, x: f32, z: f32) -> f32 {
        let sx = (x + self.offset.x) * self.zoom;
        let sz = (z + self.offset.y) * self.zoom;
        let mut sum = 0.0;
        let mut freq = self.frequency_base;
        let mut amp = 0.5;
        for _ in 0..OCTAVES {
            sum += self.noise.get_noise_2d(sx * freq, sz * freq) * amp;
            freq *= 2.0;
            amp *= 0.5;
        }
        sum
    }

    /// Height at world `(x, z)` using the configured shaping. This is the one
    /// function every placement call site uses.
    #[inline]
    pub fn elevation(&self, x: f32, z: f32) -> f32 {
        let s = self.octave_sum(x, z);
        match self.shaping {
            Shaping::Raw => s,
            Shaping::Sharpened => shape(s),
        }
    }
}
