//! Fixed perspective camera.

use glam::{Mat4, Vec3};
use glow::HasContext;

/// Perspective camera looking at the origin from a fixed eye position.
///
/// The view matrix is recomputed every frame through [`Camera::update_view`];
/// renderers read the combined matrix and upload it to the `MVP` uniform.
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Mat4,
    view: Mat4,
    eye: Vec3,
    target: Vec3,
    mvp_location: Option<glow::UniformLocation>,
}

impl Camera {
    pub const FOV_Y_DEGREES: f32 = 45.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 100.0;
    pub const EYE: Vec3 = Vec3::new(4.0, 3.0, 3.0);

    /// Creates a camera for a viewport with the given `width / height` ratio.
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            projection: projection(aspect),
            view: Mat4::IDENTITY,
            eye: Self::EYE,
            target: Vec3::ZERO,
            mvp_location: None,
        };
        camera.update_view();
        camera
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// `projection * view`. The model transform is identity.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Recomputes the view matrix from the eye and target.
    pub fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection = projection(aspect);
    }

    /// Resolves the matrix uniform in `program`.
    ///
    /// Returns false when the program has no active uniform of that name (it
    /// was optimized out, or the program failed to link). Uploads then become
    /// no-ops.
    pub fn bind(&mut self, gl: &glow::Context, program: glow::Program, uniform: &str) -> bool {
        self.mvp_location = unsafe { gl.get_uniform_location(program, uniform) };
        if self.mvp_location.is_none() {
            log::warn!("uniform `{uniform}` not found; camera matrix will not be uploaded");
        }
        self.mvp_location.is_some()
    }

    /// Writes the current view-projection matrix into the bound program.
    pub fn upload(&self, gl: &glow::Context) {
        let Some(location) = self.mvp_location.as_ref() else {
            return;
        };

        let mvp = self.view_projection().to_cols_array();
        unsafe { gl.uniform_matrix_4_f32_slice(Some(location), false, &mvp) };
    }
}

fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(Camera::FOV_Y_DEGREES.to_radians(), aspect, Camera::NEAR, Camera::FAR)
}

/// `width / height`, falling back to 1.0 for a degenerate (minimized) size.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    width as f32 / height as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn view_moves_eye_to_origin() {
        let camera = Camera::new(4.0 / 3.0);
        let eye = camera.view().transform_point3(Camera::EYE);
        assert!(eye.length() < 1e-5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera::new(4.0 / 3.0);
        let clip = camera.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn update_view_is_stable() {
        let mut camera = Camera::new(1.0);
        let before = camera.view();
        camera.update_view();
        assert_eq!(before, camera.view());
    }

    #[test]
    fn aspect_changes_projection_only() {
        let mut camera = Camera::new(1.0);
        let view = camera.view();
        let projection = camera.projection();

        camera.set_aspect(2.0);

        assert_eq!(camera.view(), view);
        assert_ne!(camera.projection(), projection);
    }

    #[test]
    fn degenerate_viewport_uses_square_aspect() {
        assert_eq!(aspect_ratio(0, 768), 1.0);
        assert_eq!(aspect_ratio(1024, 0), 1.0);
        assert!((aspect_ratio(1024, 768) - 4.0 / 3.0).abs() < 1e-6);
    }
}
