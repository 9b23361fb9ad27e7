//! Recentering tile grid with static per-slot level of detail.
#![forbid(unsafe_code)]

mod cache;
mod color;
pub mod config;
mod geometry;
mod grid;
mod lod;

pub use cache::{GeometryCache, GeometryCacheStats};
pub use color::TileColor;
pub use config::TilesConfig;
pub use geometry::TileGeometry;
pub use grid::{Tile, TileCoord, TileGrid, TileOffset, TileRender};
pub use lod::{LodBand, LodBands};
