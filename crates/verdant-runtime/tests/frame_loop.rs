use proptest::prelude::*;
use verdant_geom::{Vec2, Vec3, planar_distance};
use verdant_grass::{GrassConfig, recycle_limit};
use verdant_runtime::{ConfigHandle, ViewerState, Walkaround};
use verdant_tiles::{TileCoord, TilesConfig};

fn walkaround(handle: ConfigHandle) -> Walkaround {
    let grass = GrassConfig {
        count: 256,
        ..GrassConfig::default()
    };
    Walkaround::new(handle, &TilesConfig::default(), &grass, Vec3::ZERO)
}

fn at(x: f32, z: f32) -> ViewerState {
    ViewerState::new(Vec3::new(x, 0.0, z), Vec3::new(0.0, 0.0, -1.0))
}

#[test]
fn repeated_tick_at_same_pose_changes_nothing() {
    let mut w = walkaround(ConfigHandle::default());
    let v = at(37.0, -12.0);
    w.tick(&v);
    let positions: Vec<_> = w.tiles().map(|t| t.world_position).collect();
    let offsets = w.grass().offsets.to_vec();

    let r = w.tick(&v);
    assert!(!r.cell_changed);
    assert_eq!(r.recycled, 0);
    assert_eq!(w.tiles().map(|t| t.world_position).collect::<Vec<_>>(), positions);
    assert_eq!(&w.grass().offsets[..], &offsets[..]);
}

#[test]
fn walking_far_keeps_grass_on_the_surface() {
    let mut w = walkaround(ConfigHandle::default());
    let far = at(120.0, 75.0);
    let r = w.tick(&far);
    assert_eq!(r.recycled, 256);
    assert_eq!(r.viewer_cell, TileCoord::new(15, 9));

    let pool = w.grass_pool();
    for inst in pool.instances() {
        assert!(
            planar_distance(inst.position, far.position)
                <= recycle_limit(far.position.xz(), pool.radius()) + 1e-4
        );
        assert_eq!(inst.position.y, w.ground_height(inst.position.x, inst.position.z));
    }
}

#[test]
fn tile_surface_and_grass_share_one_height_function() {
    let mut w = walkaround(ConfigHandle::default());
    w.tick(&at(64.0, 64.0));
    let center = w
        .tiles()
        .find(|t| t.world_position == Vec3::new(64.0, 0.0, 64.0))
        .expect("center tile");
    let mut surface = Vec::new();
    center
        .geometry
        .displace_into(center.shader_offset, w.field(), &mut surface);
    for v in surface.chunks_exact(3).step_by(97) {
        assert_eq!(v[1], w.ground_height(v[0], v[2]));
    }
}

#[test]
fn published_elevation_applies_on_next_tick() {
    let handle = ConfigHandle::default();
    let mut w = walkaround(handle.clone());
    w.tick(&at(0.0, 0.0));
    let before = w.ground_height(10.0, 10.0);

    let rev = handle.update_with(|c| c.elevation.offset = [500.0, -250.0]);
    // Not picked up mid-frame.
    assert_eq!(w.ground_height(10.0, 10.0), before);

    let r = w.tick(&at(0.0, 0.0));
    assert_eq!(r.config_rev, rev);
    assert_ne!(w.ground_height(10.0, 10.0), before);

    // Instances recycled after the change are placed on the new surface.
    let r = w.tick(&at(300.0, 0.0));
    assert_eq!(r.recycled, 256);
    for inst in w.grass_pool().instances() {
        assert_eq!(inst.position.y, w.ground_height(inst.position.x, inst.position.z));
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    #[test]
    fn viewer_always_inside_center_tile(
        steps in prop::collection::vec((-20.0f32..20.0, -20.0f32..20.0), 1..40)
    ) {
        let mut w = walkaround(ConfigHandle::default());
        let mut p = Vec2::ZERO;
        let half = w.grid().tile_size() * 0.5;
        for (dx, dz) in steps {
            p = p + Vec2::new(dx, dz);
            let r = w.tick(&at(p.x, p.y));
            let center = Vec2::new(
                r.viewer_cell.x as f32 * w.grid().tile_size(),
                r.viewer_cell.z as f32 * w.grid().tile_size(),
            );
            prop_assert!(p.x >= center.x - half - 1e-3 && p.x <= center.x + half + 1e-3);
            prop_assert!(p.y >= center.y - half - 1e-3 && p.y <= center.y + half + 1e-3);
            let pool = w.grass_pool();
            for inst in pool.instances() {
                prop_assert!(planar_distance(inst.position, Vec3::new(p.x, 0.0, p.y))
                    <= recycle_limit(p, pool.radius()) + 1e-4);
            }
        }
    }
}
