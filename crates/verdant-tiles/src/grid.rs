use std::sync::Arc;

use verdant_geom::{Vec2, Vec3};

use crate::cache::GeometryCache;
use crate::config::TilesConfig;
use crate::geometry::TileGeometry;
use crate::lod::LodBands;

/// Integer slot relative to the grid center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileOffset {
    pub i: i32,
    pub j: i32,
}

impl TileOffset {
    #[inline]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

/// Grid cell in world tile units; `(x, z)` times `tile_size` is the cell center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell whose centered footprint `[(c - 1/2)s, (c + 1/2)s)` holds `p`.
    #[inline]
    pub fn containing(p: Vec3, tile_size: f32) -> Self {
        Self {
            x: (p.x / tile_size + 0.5).floor() as i32,
            z: (p.z / tile_size + 0.5).floor() as i32,
        }
    }
}

#[derive(Debug)]
pub struct Tile {
    offset: TileOffset,
    resolution: u32,
    geometry: Arc<TileGeometry>,
    world_position: Vec3,
}

impl Tile {
    #[inline]
    pub fn offset(&self) -> TileOffset {
        self.offset
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    pub fn geometry(&self) -> &Arc<TileGeometry> {
        &self.geometry
    }

    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    /// Planar offset handed to the tile shader for height sampling.
    #[inline]
    pub fn shader_offset(&self) -> Vec2 {
        self.world_position.xz()
    }
}

/// Per-tile data the renderer consumes each frame.
#[derive(Clone, Copy, Debug)]
pub struct TileRender<'a> {
    pub geometry: &'a Arc<TileGeometry>,
    pub resolution: u32,
    pub world_position: Vec3,
    pub shader_offset: Vec2,
}

/// Fixed `n × n` ring of tiles that follows the viewer.
///
/// Tiles are created once. Each keeps the offset and resolution it was built
/// with; a frame update only moves them. Resolution is chosen per slot, not
/// per world location, which is exact only while the viewer stays in the
/// center cell; the symmetry of the bands keeps the error invisible.
pub struct TileGrid {
    chunk_count: u32,
    tile_size: f32,
    tiles: Box<[Tile]>,
    cache: GeometryCache,
    viewer_cell: Option<TileCoord>,
}

impl TileGrid {
    /// # Panics
    /// If `chunk_count` is even or zero, or `tile_size` is not a positive
    /// finite number.
    pub fn new(chunk_count: u32, tile_size: f32, lod: &LodBands) -> Self {
        assert!(
            chunk_count % 2 == 1,
            "chunk_count must be odd, got {chunk_count}"
        );
        assert!(
            tile_size.is_finite() && tile_size > 0.0,
            "tile_size must be positive, got {tile_size}"
        );
        let half = (chunk_count / 2) as i32;
        let mut cache = GeometryCache::new(tile_size);
        let mut tiles = Vec::with_capacity((chunk_count * chunk_count) as usize);
        for i in -half..=half {
            for j in -half..=half {
                let distance = Vec2::new(i as f32 * tile_size, j as f32 * tile_size).length();
                let resolution = lod.select(distance);
                let geometry = cache.get_or_build(resolution);
                let offset = TileOffset::new(i, j);
                tiles.push(Tile {
                    offset,
                    resolution,
                    geometry,
                    world_position: Self::place(TileCoord::default(), offset, tile_size),
                });
            }
        }
        let stats = cache.stats();
        log::info!(
            target: "tiles",
            "tile grid {}x{} size={} tiles={} geometries={}",
            chunk_count,
            chunk_count,
            tile_size,
            tiles.len(),
            stats.entries
        );
        Self {
            chunk_count,
            tile_size,
            tiles: tiles.into_boxed_slice(),
            cache,
            viewer_cell: None,
        }
    }

    /// # Panics
    /// If the configuration does not validate.
    pub fn from_config(cfg: &TilesConfig) -> Self {
        if let Err(e) = cfg.validate() {
            panic!("invalid tiles config: {e}");
        }
        let lod = cfg.lod_bands().unwrap_or_default();
        Self::new(cfg.chunk_count, cfg.tile_size, &lod)
    }

    #[inline]
    fn place(cell: TileCoord, offset: TileOffset, tile_size: f32) -> Vec3 {
        Vec3::new(
            (cell.x + offset.i) as f32 * tile_size,
            0.0,
            (cell.z + offset.j) as f32 * tile_size,
        )
    }

    /// Recenters every tile on the viewer's cell. Returns true when the cell
    /// differs from the previous update (always true on the first call).
    pub fn update(&mut self, viewer: Vec3) -> bool {
        let cell = TileCoord::containing(viewer, self.tile_size);
        for tile in self.tiles.iter_mut() {
            tile.world_position = Self::place(cell, tile.offset, self.tile_size);
        }
        let changed = self.viewer_cell != Some(cell);
        if changed {
            log::debug!(target: "tiles", "viewer cell -> ({}, {})", cell.x, cell.z);
        }
        self.viewer_cell = Some(cell);
        changed
    }

    #[inline]
    pub fn chunk_count(&self) -> u32 {
        self.chunk_count
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Cell used by the last update, if any.
    #[inline]
    pub fn viewer_cell(&self) -> Option<TileCoord> {
        self.viewer_cell
    }

    #[inline]
    pub fn geometry_cache(&self) -> &GeometryCache {
        &self.cache
    }

    pub fn render_items(&self) -> impl Iterator<Item = TileRender<'_>> + '_ {
        self.tiles.iter().map(|t| TileRender {
            geometry: &t.geometry,
            resolution: t.resolution,
            world_position: t.world_position,
            shader_offset: t.shader_offset(),
        })
    }
}
