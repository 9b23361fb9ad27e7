use std::sync::Arc;

use hashbrown::HashMap;

use crate::geometry::TileGeometry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeometryCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Resolution -> shared plane geometry. Bounded by the number of LOD bands,
/// so nothing is ever evicted.
pub struct GeometryCache {
    tile_size: f32,
    entries: HashMap<u32, Arc<TileGeometry>>,
    hits: u64,
    misses: u64,
}

impl GeometryCache {
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_build(&mut self, resolution: u32) -> Arc<TileGeometry> {
        if let Some(geom) = self.entries.get(&resolution) {
            self.hits += 1;
            return Arc::clone(geom);
        }
        self.misses += 1;
        let geom = Arc::new(TileGeometry::plane(self.tile_size, resolution));
        log::debug!(
            target: "tiles",
            "built tile geometry res={} verts={} tris={}",
            resolution,
            geom.vertex_count(),
            geom.triangle_count()
        );
        self.entries.insert(resolution, Arc::clone(&geom));
        geom
    }

    #[inline]
    pub fn get(&self, resolution: u32) -> Option<&Arc<TileGeometry>> {
        self.entries.get(&resolution)
    }

    pub fn stats(&self) -> GeometryCacheStats {
        GeometryCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
