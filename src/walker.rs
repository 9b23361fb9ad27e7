use clap::ValueEnum;
use verdant_geom::Vec3;
use verdant_runtime::ViewerState;

use crate::config::ViewerConfig;

/// Scripted movement used in place of keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Route {
    #[default]
    Idle,
    /// Straight ahead along the starting yaw.
    Line,
    /// Constant turn rate; loops back over the same ground.
    Circle,
}

const CIRCLE_RADIUS: f32 = 24.0;

#[derive(Debug)]
pub struct Walker {
    pub pos: Vec3, // feet position (y snapped to ground)
    pub yaw: f32,  // degrees
    pub pitch: f32,
    pub eye_height: f32,
    pub speed: f32, // units/s
    pub route: Route,
    pub distance: f32,
}

impl Walker {
    pub fn new(cfg: &ViewerConfig, route: Route) -> Self {
        Self {
            pos: Vec3::new(cfg.spawn[0], 0.0, cfg.spawn[1]),
            yaw: -45.0,
            pitch: -15.0,
            eye_height: cfg.eye_height,
            speed: cfg.speed,
            route,
            distance: 0.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalized()
    }

    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(self.pos.x, self.pos.y + self.eye_height, self.pos.z)
    }

    /// Moves along the route for `dt` seconds and snaps the feet to the
    /// ground sampled by `ground(x, z)`.
    pub fn step<F>(&mut self, dt: f32, ground: &F)
    where
        F: Fn(f32, f32) -> f32,
    {
        let step = self.speed * dt.max(0.0);
        match self.route {
            Route::Idle => {}
            Route::Line => self.advance(step),
            Route::Circle => {
                self.yaw += (step / CIRCLE_RADIUS).to_degrees();
                self.yaw = self.yaw.rem_euclid(360.0);
                self.advance(step);
            }
        }
        self.pos.y = ground(self.pos.x, self.pos.z);
    }

    fn advance(&mut self, step: f32) {
        let (s, c) = self.yaw.to_radians().sin_cos();
        self.pos.x += c * step;
        self.pos.z += s * step;
        self.distance += step;
    }

    pub fn viewer_state(&self) -> ViewerState {
        ViewerState::new(self.eye_position(), self.forward())
    }
}
