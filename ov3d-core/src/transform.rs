/// 3D transformation composition and rotation state
use crate::matrix::Mat4;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// Transform builder for 3D transformations.
///
/// Composition order is a contract: rotations apply X first, then Y, then Z,
/// and translation last. Matrix multiplication is non-commutative, so callers
/// must compose through these helpers rather than reorder the factors.
pub struct Transform;

impl Transform {
    /// Rotation matrix applying X, then Y, then Z.
    pub fn rotation_matrix(rotation: &RotationState) -> Mat4 {
        Mat4::rotation_z(rotation.z) * Mat4::rotation_y(rotation.y) * Mat4::rotation_x(rotation.x)
    }

    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::translation(x, y, z)
    }

    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4::scale(sx, sy, sz)
    }

    /// View matrix: rotate X, then Y, then Z, then translate along Z by
    /// `distance` (negative values move the scene away from the viewer).
    pub fn view_matrix(rotation: &RotationState, distance: f32) -> Mat4 {
        Mat4::translation(0.0, 0.0, distance) * Self::rotation_matrix(rotation)
    }

    /// Model-view-projection product.
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        projection.multiply(&view.multiply(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&RotationState::zero());
        assert_eq!(matrix, Mat4::IDENTITY);
    }

    #[test]
    fn test_scale_then_translate() {
        let m = Transform::translation_matrix(1.0, 0.0, 0.0)
            .multiply(&Transform::scale_matrix(2.0, 2.0, 2.0));
        let p = m.transform_point([1.0, 1.0, 1.0]).unwrap();
        assert_eq!(p, [3.0, 2.0, 2.0]);
    }

    #[test]
    fn test_view_matrix_translates_after_rotating() {
        // A half-turn around Y sends +Z to -Z, then the view pullback applies
        let rotation = RotationState::new(0.0, std::f32::consts::PI, 0.0);
        let view = Transform::view_matrix(&rotation, -9.0);
        let p = view.transform_point([0.0, 0.0, 1.0]).unwrap();
        assert!(p[0].abs() < 1e-6);
        assert!(p[1].abs() < 1e-6);
        assert!((p[2] - -10.0).abs() < 1e-5);
    }
}
