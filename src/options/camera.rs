use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera placement and projection.
pub struct CameraOptions {
    /// Eye position.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            eye: camera.eye.to_array(),
            fovy: camera.fovy,
            znear: camera.znear,
            zfar: camera.zfar,
        }
    }
}

impl CameraOptions {
    /// Camera with these settings at `aspect`.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye.into(),
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
            aspect,
            ..Camera::default()
        }
    }
}
