use verdant_geom::Vec3;

/// Viewer pose, owned by the movement/camera side and read once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerState {
    pub position: Vec3,
    pub facing: Vec3,
}

impl ViewerState {
    #[inline]
    pub fn new(position: Vec3, facing: Vec3) -> Self {
        Self { position, facing }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            facing: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}
