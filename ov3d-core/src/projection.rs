/// Camera and perspective projection
use thiserror::Error;

use crate::matrix::Mat4;
use crate::transform::{RotationState, Transform};

/// Errors from degenerate projection parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// `far == near` collapses the depth range.
    #[error("near and far clip planes are equal")]
    EqualClipPlanes,

    /// The vertical field of view must be in (0, 180) degrees.
    #[error("field of view {0} degrees is outside (0, 180)")]
    InvalidFieldOfView(i32),

    /// The aspect ratio must be positive.
    #[error("aspect ratio must be positive")]
    NonPositiveAspect,
}

/// Build a right-handed perspective projection matrix.
///
/// `fov_y_degrees` is the vertical field of view; `aspect` is viewport
/// width / height. Looking down -Z, depths in [near, far] map to NDC
/// [-1, 1] after the w divide.
pub fn perspective(
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, ProjectionError> {
    if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
        return Err(ProjectionError::InvalidFieldOfView(fov_y_degrees as i32));
    }
    if !(aspect > 0.0) {
        return Err(ProjectionError::NonPositiveAspect);
    }
    if far == near {
        return Err(ProjectionError::EqualClipPlanes);
    }

    let half_fov = fov_y_degrees.to_radians() / 2.0;
    let f = 1.0 / half_fov.tan();
    let depth = far - near;

    Ok(Mat4([
        f / aspect, 0.0, 0.0, 0.0, //
        0.0, f, 0.0, 0.0, //
        0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth, //
        0.0, 0.0, -1.0, 0.0,
    ]))
}

/// Camera configuration: projection parameters plus an euler-orbit view.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub rotation: RotationState,
    /// View translation along Z; negative pulls the scene away.
    pub distance: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fov_y_degrees: 30.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            rotation: RotationState::zero(),
            distance: -9.0,
        }
    }

    /// View matrix composed in the fixed rotate-then-translate order.
    pub fn view_matrix(&self) -> Mat4 {
        Transform::view_matrix(&self.rotation, self.distance)
    }

    pub fn projection_matrix(&self) -> Result<Mat4, ProjectionError> {
        perspective(self.fov_y_degrees, self.aspect, self.near, self.far)
    }

    /// Project a 3D point through model, view and projection to screen space.
    ///
    /// Returns `(x, y, depth)` with depth in NDC [-1, 1], or `None` when the
    /// point is clipped or its w is degenerate.
    pub fn project_to_screen(
        &self,
        point: [f32; 3],
        model_matrix: &Mat4,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let projection = self.projection_matrix().ok()?;
        let mvp = Transform::mvp_matrix(model_matrix, &self.view_matrix(), &projection);

        let [ndc_x, ndc_y, depth] = mvp.transform_point(point)?;

        // Clip test, including depth
        if !(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&depth)
        {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn test_square_90_degree_projection() {
        let m = perspective(90.0, 1.0, 0.1, 100.0).unwrap();
        // tan(45 deg) == 1, so both focal entries are 1
        assert!((m.0[0] - 1.0).abs() < 1e-6);
        assert!((m.0[5] - 1.0).abs() < 1e-6);
        assert_eq!(m.0[14], -1.0);
        assert_eq!(m.0[15], 0.0);
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let m = perspective(70.0, 16.0 / 9.0, 0.1, 100.0).unwrap();
        let n = Matrix4::new_perspective(16.0 / 9.0, 70.0f32.to_radians(), 0.1, 100.0);
        assert!((Matrix4::from_row_slice(m.as_slice()) - n).norm() < 1e-4);
    }

    #[test]
    fn test_degenerate_parameters_are_rejected() {
        assert_eq!(
            perspective(90.0, 1.0, 1.0, 1.0),
            Err(ProjectionError::EqualClipPlanes)
        );
        assert_eq!(
            perspective(0.0, 1.0, 0.1, 100.0),
            Err(ProjectionError::InvalidFieldOfView(0))
        );
        assert_eq!(
            perspective(45.0, 0.0, 0.1, 100.0),
            Err(ProjectionError::NonPositiveAspect)
        );
    }

    #[test]
    fn test_camera_projects_origin_to_screen_center() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen([0.0, 0.0, 0.0], &Mat4::IDENTITY, 800, 600)
            .unwrap();
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(100, 100);
        // Far beyond the far plane after the view pullback
        assert!(camera
            .project_to_screen([0.0, 0.0, 200.0], &Mat4::IDENTITY, 100, 100)
            .is_none());
    }
}
