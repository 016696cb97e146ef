//! Rendering subsystems: the orb geometry pass and the post-processing
//! stack.

pub mod orb_pass;
pub(crate) mod pipeline_util;
pub mod postprocess;
pub mod sphere_mesh;

pub use orb_pass::OrbRenderer;
