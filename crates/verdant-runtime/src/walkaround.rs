use std::sync::Arc;

use verdant_field::ElevationField;
use verdant_geom::Vec3;
use verdant_grass::{GrassConfig, GrassPool, InstanceBuffers};
use verdant_tiles::{TileColor, TileCoord, TileGrid, TileRender, TilesConfig};

use crate::live::{ConfigHandle, LiveConfig};
use crate::viewer::ViewerState;

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub tick: u64,
    pub config_rev: u64,
    pub viewer_cell: TileCoord,
    pub cell_changed: bool,
    pub recycled: usize,
}

/// Tile grid, grass pool and elevation field stepped together each frame.
///
/// The field is rebuilt only when the live config revision moves, so every
/// height query within a tick sees the same parameters.
pub struct Walkaround {
    handle: ConfigHandle,
    live: Arc<LiveConfig>,
    field: ElevationField,
    field_rev: u64,
    grid: TileGrid,
    grass: GrassPool,
    ticks: u64,
}

impl Walkaround {
    /// # Panics
    /// If either config does not validate.
    pub fn new(
        handle: ConfigHandle,
        tiles: &TilesConfig,
        grass: &GrassConfig,
        spawn: Vec3,
    ) -> Self {
        let (rev, live) = handle.snapshot();
        let field = ElevationField::new(&live.elevation);
        let grid = TileGrid::from_config(tiles);
        let grass = GrassPool::new(grass, spawn, &|x, z| field.elevation(x, z));
        Self {
            handle,
            live,
            field,
            field_rev: rev,
            grid,
            grass,
            ticks: 0,
        }
    }

    /// Picks up the latest published config. Called at the top of every
    /// tick; callers that sample heights before ticking may call it first.
    pub fn sync_config(&mut self) -> u64 {
        let (rev, live) = self.handle.snapshot();
        if rev != self.field_rev {
            if live.elevation != self.live.elevation {
                self.field = ElevationField::new(&live.elevation);
                log::debug!(target: "frame", "elevation field rebuilt at rev {}", rev);
            }
            self.field_rev = rev;
        }
        self.live = live;
        rev
    }

    /// Advances one frame for `viewer`.
    pub fn tick(&mut self, viewer: &ViewerState) -> FrameReport {
        let rev = self.sync_config();
        let cell_changed = self.grid.update(viewer.position);
        let field = &self.field;
        let recycled = self
            .grass
            .update(viewer.position, &|x, z| field.elevation(x, z));
        self.ticks += 1;

        let viewer_cell = self.grid.viewer_cell().unwrap_or_default();
        log::trace!(
            target: "frame",
            "tick {} cell=({}, {}) changed={} recycled={}",
            self.ticks,
            viewer_cell.x,
            viewer_cell.z,
            cell_changed,
            recycled
        );
        FrameReport {
            tick: self.ticks,
            config_rev: rev,
            viewer_cell,
            cell_changed,
            recycled,
        }
    }

    /// Ground height under `(x, z)` from the field of the last tick.
    #[inline]
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.field.elevation(x, z)
    }

    #[inline]
    pub fn field(&self) -> &ElevationField {
        &self.field
    }

    #[inline]
    pub fn tiles(&self) -> impl Iterator<Item = TileRender<'_>> + '_ {
        self.grid.render_items()
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn grass(&self) -> &InstanceBuffers {
        self.grass.buffers()
    }

    #[inline]
    pub fn grass_pool(&self) -> &GrassPool {
        &self.grass
    }

    #[inline]
    pub fn tile_color(&self) -> TileColor {
        self.live.tile_color
    }
}
