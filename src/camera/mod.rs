//! Scene camera, point lights and the scene-wide GPU uniform.

/// Camera, lights and GPU uniform types.
pub mod core;

pub use self::core::{Camera, GpuPointLight, PointLight, SceneUniform, MAX_LIGHTS};
