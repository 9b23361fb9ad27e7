use verdant_field::ElevationField;
use verdant_geom::Vec2;

/// Flat square patch in the XZ plane, centered on the tile origin.
///
/// Height is not baked in: the renderer displaces vertices using the tile's
/// world offset, so one geometry serves every tile at the same resolution.
#[derive(Clone, Debug)]
pub struct TileGeometry {
    size: f32,
    resolution: u32,
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl TileGeometry {
    /// `size × size` plane split into `resolution × resolution` quads.
    /// Vertices are row-major by z then x, triangles wind counter-clockwise
    /// when seen from +Y.
    pub fn plane(size: f32, resolution: u32) -> Self {
        let res = resolution.max(1);
        let n = res as usize + 1;
        let half = size * 0.5;
        let mut pos = Vec::with_capacity(n * n * 3);
        let mut norm = Vec::with_capacity(n * n * 3);
        let mut uv = Vec::with_capacity(n * n * 2);
        for zi in 0..n {
            let v = zi as f32 / res as f32;
            let z = -half + v * size;
            for xi in 0..n {
                let u = xi as f32 / res as f32;
                let x = -half + u * size;
                pos.extend_from_slice(&[x, 0.0, z]);
                norm.extend_from_slice(&[0.0, 1.0, 0.0]);
                uv.extend_from_slice(&[u, 1.0 - v]);
            }
        }

        let quads = res as usize * res as usize;
        let mut idx = Vec::with_capacity(quads * 6);
        let row = n as u32;
        for zi in 0..res {
            for xi in 0..res {
                let a = zi * row + xi;
                let b = (zi + 1) * row + xi;
                let c = (zi + 1) * row + xi + 1;
                let d = zi * row + xi + 1;
                idx.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            size,
            resolution: res,
            pos,
            norm,
            uv,
            idx,
        }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Writes world-space positions for a tile placed at `offset`, lifting each
    /// vertex to the field height. `out` is cleared but keeps its capacity.
    pub fn displace_into(&self, offset: Vec2, field: &ElevationField, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.pos.len());
        for p in self.pos.chunks_exact(3) {
            let x = p[0] + offset.x;
            let z = p[2] + offset.y;
            out.extend_from_slice(&[x, field.elevation(x, z), z]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_field::ElevationParams;

    #[test]
    fn plane_counts() {
        let g = TileGeometry::plane(8.0, 4);
        assert_eq!(g.vertex_count(), 25);
        assert_eq!(g.triangle_count(), 32);
        assert_eq!(g.norm.len(), g.pos.len());
        assert_eq!(g.uv.len(), g.vertex_count() * 2);
        assert!(g.idx.iter().all(|&i| (i as usize) < g.vertex_count()));
    }

    #[test]
    fn plane_spans_centered_square() {
        let g = TileGeometry::plane(32.0, 128);
        let xs = g.pos.chunks_exact(3).map(|p| p[0]);
        let zs = g.pos.chunks_exact(3).map(|p| p[2]);
        let (min_x, max_x) = xs.fold((f32::MAX, f32::MIN), |(a, b), x| (a.min(x), b.max(x)));
        let (min_z, max_z) = zs.fold((f32::MAX, f32::MIN), |(a, b), z| (a.min(z), b.max(z)));
        assert_eq!((min_x, max_x), (-16.0, 16.0));
        assert_eq!((min_z, max_z), (-16.0, 16.0));
        assert!(g.pos.chunks_exact(3).all(|p| p[1] == 0.0));
    }

    #[test]
    fn triangles_face_up() {
        let g = TileGeometry::plane(2.0, 3);
        let vtx = |i: u32| {
            let i = i as usize * 3;
            (g.pos[i], g.pos[i + 2])
        };
        for tri in g.idx.chunks_exact(3) {
            let (ax, az) = vtx(tri[0]);
            let (bx, bz) = vtx(tri[1]);
            let (cx, cz) = vtx(tri[2]);
            // y component of (b - a) × (c - a)
            let ny = (bz - az) * (cx - ax) - (bx - ax) * (cz - az);
            assert!(ny > 0.0, "triangle {:?} winds downwards", tri);
        }
    }

    #[test]
    fn displace_lifts_to_field_height() {
        let field = ElevationField::new(&ElevationParams::default());
        let g = TileGeometry::plane(8.0, 2);
        let mut out = Vec::new();
        g.displace_into(Vec2::new(16.0, -8.0), &field, &mut out);
        assert_eq!(out.len(), g.pos.len());
        for (local, world) in g.pos.chunks_exact(3).zip(out.chunks_exact(3)) {
            assert_eq!(world[0], local[0] + 16.0);
            assert_eq!(world[2], local[2] - 8.0);
            assert_eq!(world[1], field.elevation(world[0], world[2]));
        }

        let cap = out.capacity();
        g.displace_into(Vec2::ZERO, &field, &mut out);
        assert_eq!(out.capacity(), cap);
    }
}
