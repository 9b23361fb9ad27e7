/// Flat per-instance attribute arrays in slot order.
///
/// Lengths are fixed at construction (`offsets` is `3 * capacity`), so the
/// renderer's instanced buffers never need resizing.
#[derive(Clone, Debug)]
pub struct InstanceBuffers {
    pub offsets: Box<[f32]>,
    pub scales: Box<[f32]>,
    pub rotations: Box<[f32]>,
    visible_count: usize,
}

impl InstanceBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            offsets: vec![0.0; capacity * 3].into_boxed_slice(),
            scales: vec![0.0; capacity].into_boxed_slice(),
            rotations: vec![0.0; capacity].into_boxed_slice(),
            visible_count: capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.scales.len()
    }

    /// Instances the renderer should draw, always a prefix of the slots.
    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Clamped to capacity.
    #[inline]
    pub fn set_visible_count(&mut self, n: usize) {
        self.visible_count = n.min(self.capacity());
    }

    #[inline]
    pub(crate) fn write(&mut self, slot: usize, offset: [f32; 3], scale: f32, rotation: f32) {
        self.offsets[slot * 3..slot * 3 + 3].copy_from_slice(&offset);
        self.scales[slot] = scale;
        self.rotations[slot] = rotation;
    }
}
