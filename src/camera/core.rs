use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Maximum point lights the orb shaders read.
pub const MAX_LIGHTS: usize = 4;

/// Perspective camera looking at the orb scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Look-at target.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near plane distance.
    pub znear: f32,
    /// Far plane distance.
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 12.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 50.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// World → view.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// View → clip, `[0, 1]` depth (wgpu convention).
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect.max(1e-3),
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection.
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Distance from the eye, used for back-to-front ordering.
    pub fn depth_of(&self, point: Vec3) -> f32 {
        (point - self.eye).dot((self.target - self.eye).normalize_or_zero())
    }

    /// Project a world point to NDC; `None` when behind the camera.
    pub fn project_to_ndc(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.build_matrix() * point.extend(1.0);
        (clip.w > 1e-6).then(|| clip.xy() / clip.w)
    }

    /// Project a world point to pixel coordinates (origin top-left).
    pub fn project_to_screen(&self, point: Vec3, size: (u32, u32)) -> Option<Vec2> {
        self.project_to_ndc(point).map(|ndc| {
            Vec2::new(
                (ndc.x + 1.0) * 0.5 * size.0 as f32,
                (1.0 - ndc.y) * 0.5 * size.1 as f32,
            )
        })
    }
}

/// CPU-side point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World position.
    pub position: Vec3,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Strength.
    pub intensity: f32,
}

/// GPU layout of one point light (WGSL `PointLight`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPointLight {
    /// World position.
    pub position: [f32; 3],
    /// Strength.
    pub intensity: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl From<&PointLight> for GpuPointLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.to_array(),
            intensity: light.intensity,
            color: light.color,
            _pad: 0.0,
        }
    }
}

/// Scene-wide uniform at `@group(0) @binding(0)` (WGSL `SceneUniform`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position.
    pub eye: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Lights used from `lights`.
    pub light_count: u32,
    /// Ambient term.
    pub ambient: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
    /// Point lights; entries past `light_count` are ignored.
    pub lights: [GpuPointLight; MAX_LIGHTS],
}

impl SceneUniform {
    /// Uniform for `camera` lit by (at most [`MAX_LIGHTS`] of) `lights`.
    pub fn new(camera: &Camera, lights: &[PointLight], ambient: f32) -> Self {
        let mut gpu_lights = [GpuPointLight::from(&PointLight {
            position: Vec3::ZERO,
            color: [0.0; 3],
            intensity: 0.0,
        }); MAX_LIGHTS];
        for (slot, light) in gpu_lights.iter_mut().zip(lights) {
            *slot = light.into();
        }
        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
            eye: camera.eye.to_array(),
            aspect: camera.aspect,
            light_count: lights.len().min(MAX_LIGHTS) as u32,
            ambient,
            _pad: [0.0; 2],
            lights: gpu_lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(size_of::<GpuPointLight>(), 32);
        assert_eq!(size_of::<SceneUniform>(), 224);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::default();
        let p = camera.project_to_screen(Vec3::ZERO, (800, 600)).unwrap();
        assert!(p.abs_diff_eq(Vec2::new(400.0, 300.0), 1e-3));
    }

    #[test]
    fn right_and_up_map_to_screen_axes() {
        let camera = Camera::default();
        let right = camera.project_to_screen(Vec3::X, (800, 600)).unwrap();
        let up = camera.project_to_screen(Vec3::Y, (800, 600)).unwrap();
        assert!(right.x > 400.0);
        assert!(up.y < 300.0);
    }

    #[test]
    fn behind_camera_does_not_project() {
        let camera = Camera::default();
        assert!(camera.project_to_ndc(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn scene_uniform_caps_lights() {
        let light = PointLight {
            position: Vec3::ONE,
            color: [1.0; 3],
            intensity: 1.0,
        };
        let u = SceneUniform::new(&Camera::default(), &[light; 6], 0.2);
        assert_eq!(u.light_count, 4);
        assert_eq!(u.lights[3].intensity, 1.0);
    }

    #[test]
    fn depth_grows_away_from_eye() {
        let camera = Camera::default();
        assert!(camera.depth_of(Vec3::new(0.0, 0.0, -2.0)) > camera.depth_of(Vec3::ZERO));
    }
}
