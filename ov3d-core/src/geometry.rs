/// Indexed mesh buffers produced by the OBJ decoder

/// A compact, GPU-ready indexed triangle mesh.
///
/// Attribute buffers are flat and parallel: `positions` and `normals` have a
/// stride of 3 floats per vertex, `tex_coords` a stride of 2. `indices` holds
/// three entries per triangle and references all three buffers by the same
/// compact vertex index. The buffers are deduplicated in first-seen order and
/// immutable once returned by the parser; they can be uploaded to a rendering
/// boundary as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            tex_coords: Vec::with_capacity(vertices * 2),
            normals: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Number of welded vertices in the attribute buffers.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, vertex: usize) -> [f32; 3] {
        let i = vertex * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    pub fn normal(&self, vertex: usize) -> [f32; 3] {
        let i = vertex * 3;
        [self.normals[i], self.normals[i + 1], self.normals[i + 2]]
    }

    pub fn tex_coord(&self, vertex: usize) -> [f32; 2] {
        let i = vertex * 2;
        [self.tex_coords[i], self.tex_coords[i + 1]]
    }

    /// The three vertex indices of one triangle.
    pub fn triangle(&self, triangle: usize) -> [u32; 3] {
        let i = triangle * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Create a unit-style cube mesh for demos and testing.
    ///
    /// Each of the six faces carries its own four vertices so normals stay
    /// flat, matching what welding a cube OBJ with per-face normals produces.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // Front
            ([0.0, 0.0, 1.0], [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]]),
            // Back
            ([0.0, 0.0, -1.0], [[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]]),
            // Top
            ([0.0, 1.0, 0.0], [[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]]),
            // Bottom
            ([0.0, -1.0, 0.0], [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]]),
            // Right
            ([1.0, 0.0, 0.0], [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]]),
            // Left
            ([-1.0, 0.0, 0.0], [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]]),
        ];
        let uv: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let mut mesh = Self::with_capacity(24, 12);
        for (normal, corners) in faces {
            let base = mesh.vertex_count() as u32;
            for (corner, tex) in corners.iter().zip(uv) {
                mesh.positions.extend_from_slice(corner);
                mesh.normals.extend_from_slice(&normal);
                mesh.tex_coords.extend_from_slice(&tex);
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_buffers_are_consistent() {
        let cube = IndexedMesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.positions.len(), cube.normals.len());
        assert_eq!(cube.positions.len() / 3, cube.tex_coords.len() / 2);
        assert!(cube
            .indices
            .iter()
            .all(|&i| (i as usize) < cube.vertex_count()));
    }

    #[test]
    fn test_cube_normals_are_unit_axes() {
        let cube = IndexedMesh::cube(1.0);
        for v in 0..cube.vertex_count() {
            let n = cube.normal(v);
            let len2 = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
            assert!((len2 - 1.0).abs() < 1e-6);
        }
    }
}
