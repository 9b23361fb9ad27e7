use std::f32::consts::{PI, TAU};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use verdant_geom::{Vec2, Vec3};

use crate::buffers::InstanceBuffers;
use crate::config::GrassConfig;

/// Rounding allowance on the recycle radius, in units of `f32::EPSILON`
/// times the largest coordinate involved. A recycled instance lands on the
/// rim only up to the rounding of `center + R·dir`, which grows with the
/// distance from the world origin.
pub const RECYCLE_SLACK_ULPS: f32 = 4.0;

/// Planar distance beyond which an instance around `center` is outside the
/// disk of `radius`.
#[inline]
pub fn recycle_limit(center: Vec2, radius: f32) -> f32 {
    let magnitude = center.x.abs().max(center.y.abs()) + radius;
    radius + RECYCLE_SLACK_ULPS * f32::EPSILON * magnitude
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrassInstance {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
}

/// `N` grass instances kept on a disk of radius `R` around the viewer.
///
/// Slots are never added, removed or reordered. An instance that leaves the
/// disk is overwritten in place with a new position on the far edge.
pub struct GrassPool {
    instances: Box<[GrassInstance]>,
    buffers: InstanceBuffers,
    radius: f32,
    scale_min: f32,
    scale_max: f32,
    rng: ChaCha8Rng,
    recycled_total: u64,
}

impl GrassPool {
    /// Scatters `cfg.count` instances uniformly over the disk around `viewer`.
    /// `height` maps world `(x, z)` to ground height.
    ///
    /// # Panics
    /// If `cfg` does not validate.
    pub fn new<F>(cfg: &GrassConfig, viewer: Vec3, height: &F) -> Self
    where
        F: Fn(f32, f32) -> f32,
    {
        if let Err(e) = cfg.validate() {
            panic!("invalid grass config: {e}");
        }
        let mut pool = Self {
            instances: Box::default(),
            buffers: InstanceBuffers::new(cfg.count),
            radius: cfg.radius,
            scale_min: cfg.scale_min,
            scale_max: cfg.scale_max,
            rng: ChaCha8Rng::seed_from_u64(cfg.seed),
            recycled_total: 0,
        };
        let center = viewer.xz();
        let mut instances = Vec::with_capacity(cfg.count);
        for _ in 0..cfg.count {
            let angle = pool.rng.gen_range(0.0..TAU);
            // sqrt keeps area density uniform instead of bunching at the center
            let r = pool.rng.gen_range(0.0f32..1.0).sqrt() * pool.radius;
            let p = center + Vec2::from_angle(angle) * r;
            let (rotation_y, scale) = pool.random_pose();
            instances.push(GrassInstance {
                position: Vec3::new(p.x, height(p.x, p.y), p.y),
                rotation_y,
                scale,
            });
        }
        pool.instances = instances.into_boxed_slice();
        for slot in 0..pool.instances.len() {
            pool.write_slot(slot);
        }
        log::info!(
            target: "grass",
            "grass pool count={} radius={} seed={}",
            cfg.count,
            cfg.radius,
            cfg.seed
        );
        pool
    }

    fn random_pose(&mut self) -> (f32, f32) {
        let rotation = self.rng.gen_range(0.0..TAU);
        let scale = if self.scale_max > self.scale_min {
            self.rng.gen_range(self.scale_min..self.scale_max)
        } else {
            self.scale_min
        };
        (rotation, scale)
    }

    #[inline]
    fn write_slot(&mut self, slot: usize) {
        let inst = self.instances[slot];
        self.buffers.write(
            slot,
            [inst.position.x, inst.position.y, inst.position.z],
            inst.scale,
            inst.rotation_y,
        );
    }

    /// Moves every instance outside the disk to the mirrored point on its
    /// rim, then refreshes the attribute buffers. Returns how many moved.
    pub fn update<F>(&mut self, viewer: Vec3, height: &F) -> usize
    where
        F: Fn(f32, f32) -> f32,
    {
        let center = viewer.xz();
        let limit = recycle_limit(center, self.radius);
        let limit_sq = limit * limit;
        let mut recycled = 0;
        for slot in 0..self.instances.len() {
            let d = self.instances[slot].position.xz() - center;
            if d.length_sq() > limit_sq {
                // Vec2::angle pins the (0, 0) direction to 0.
                let angle = d.angle() + PI;
                let p = center + Vec2::from_angle(angle) * self.radius;
                let (rotation_y, scale) = self.random_pose();
                self.instances[slot] = GrassInstance {
                    position: Vec3::new(p.x, height(p.x, p.y), p.y),
                    rotation_y,
                    scale,
                };
                recycled += 1;
            }
            self.write_slot(slot);
        }
        self.recycled_total += recycled as u64;
        if recycled > 0 {
            log::trace!(target: "grass", "recycled {} of {}", recycled, self.instances.len());
        }
        recycled
    }

    #[inline]
    pub fn instances(&self) -> &[GrassInstance] {
        &self.instances
    }

    #[inline]
    pub fn buffers(&self) -> &InstanceBuffers {
        &self.buffers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn recycled_total(&self) -> u64 {
        self.recycled_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_geom::planar_distance;

    fn flat(_: f32, _: f32) -> f32 {
        0.0
    }

    fn ramp(x: f32, z: f32) -> f32 {
        0.5 * x - 0.25 * z
    }

    fn pool(count: usize, radius: f32) -> GrassPool {
        let cfg = GrassConfig {
            count,
            radius,
            ..GrassConfig::default()
        };
        GrassPool::new(&cfg, Vec3::ZERO, &flat)
    }

    #[test]
    fn instance_just_outside_wraps_to_opposite_rim() {
        let mut p = pool(1, 6.0);
        p.instances[0].position = Vec3::new(6.1, 3.0, 0.0);
        assert_eq!(p.update(Vec3::ZERO, &ramp), 1);
        let inst = p.instances()[0];
        assert!((inst.position.x + 6.0).abs() <= 1e-5);
        assert!(inst.position.z.abs() <= 1e-5);
        assert!((planar_distance(inst.position, Vec3::ZERO) - 6.0).abs() <= 1e-5);
        assert_eq!(inst.position.y, ramp(inst.position.x, inst.position.z));
        assert!((0.4..0.6).contains(&inst.scale));
        assert!((0.0..TAU).contains(&inst.rotation_y));
    }

    #[test]
    fn just_past_the_rim_is_recycled() {
        let mut p = pool(1, 6.0);
        p.instances[0].position = Vec3::new(6.0 * 1.0009, 0.0, 0.0);
        assert_eq!(p.update(Vec3::ZERO, &flat), 1);
        p.instances[0].position = Vec3::new(6.0, 0.0, 0.0);
        assert_eq!(p.update(Vec3::ZERO, &flat), 0);
    }

    #[test]
    fn far_from_origin_recycled_instances_stay_put() {
        let mut p = pool(256, 6.0);
        for viewer in [
            Vec3::new(3.0e5, 0.0, -2.0e5),
            Vec3::new(-1.0e6, 0.0, 7.5e5),
        ] {
            assert_eq!(p.update(viewer, &flat), 256);
            assert_eq!(p.update(viewer, &flat), 0);
            assert_eq!(p.update(viewer, &flat), 0);
        }
    }

    #[test]
    fn scatter_fills_the_disk() {
        let p = pool(2048, 6.0);
        let mut max = 0.0f32;
        for inst in p.instances() {
            let d = planar_distance(inst.position, Vec3::ZERO);
            assert!(d <= 6.0 + 1e-5);
            max = max.max(d);
        }
        assert!(max > 5.5, "scatter never reached the rim: {max}");
    }

    #[test]
    fn inside_instances_are_untouched() {
        let mut p = pool(64, 6.0);
        let before = p.instances().to_vec();
        assert_eq!(p.update(Vec3::ZERO, &flat), 0);
        assert_eq!(p.instances(), &before[..]);
    }

    #[test]
    fn second_update_at_same_viewer_recycles_nothing() {
        let mut p = pool(512, 6.0);
        let viewer = Vec3::new(40.0, 2.0, -13.0);
        assert_eq!(p.update(viewer, &flat), 512);
        assert_eq!(p.update(viewer, &flat), 0);
        assert_eq!(p.recycled_total(), 512);
    }

    #[test]
    fn zero_radius_collapses_onto_viewer_without_nan() {
        let mut p = pool(8, 0.0);
        let viewer = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(p.update(viewer, &flat), 8);
        for inst in p.instances() {
            assert!(inst.position.x.is_finite() && inst.position.z.is_finite());
            assert!(planar_distance(inst.position, viewer) <= 1e-6);
        }
        // Every instance now sits on the viewer: distance² == 0 is not "outside".
        assert_eq!(p.update(viewer, &flat), 0);
    }

    #[test]
    fn buffers_mirror_instances_by_slot() {
        let mut p = pool(32, 6.0);
        p.update(Vec3::new(9.0, 0.0, 9.0), &ramp);
        let b = p.buffers();
        assert_eq!(b.capacity(), 32);
        assert_eq!(b.visible_count(), 32);
        assert_eq!(b.offsets.len(), 96);
        for (slot, inst) in p.instances().iter().enumerate() {
            assert_eq!(
                &b.offsets[slot * 3..slot * 3 + 3],
                &[inst.position.x, inst.position.y, inst.position.z]
            );
            assert_eq!(b.scales[slot], inst.scale);
            assert_eq!(b.rotations[slot], inst.rotation_y);
        }
    }

    #[test]
    fn same_seed_scatters_identically() {
        let a = pool(100, 6.0);
        let b = pool(100, 6.0);
        assert_eq!(a.instances(), b.instances());
    }

    #[test]
    fn empty_pool_is_legal() {
        let mut p = pool(0, 6.0);
        assert!(p.is_empty());
        assert_eq!(p.update(Vec3::new(100.0, 0.0, 0.0), &flat), 0);
        assert_eq!(p.buffers().visible_count(), 0);
    }
}
