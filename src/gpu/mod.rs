//! GPU plumbing: device/surface setup, WGSL composition and pipeline
//! helpers.

/// Shared wgpu boilerplate for pipelines, bindings and render targets.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
