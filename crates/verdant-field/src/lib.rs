//! Elevation field: layered coherent noise and its tunable parameters.
#![forbid(unsafe_code)]

mod field;
pub mod params;

pub use field::{ElevationField, OCTAVES, shape};
pub use params::{ElevationParams, Shaping};
