//! Orb shader programs: uniform schemas, the GPU uniform block, the
//! built-in catalog and the registry that resolves style ids.

pub mod catalog;
/// Immutable program descriptors and style presets.
pub mod descriptor;
/// Program registry and its validating builder.
pub mod registry;
pub mod uniform;

pub use catalog::BuiltinStyle;
pub use descriptor::{ShaderProgramDescriptor, StylePreset};
pub use registry::{RegistryBuilder, ShaderRegistry};
pub use uniform::{UniformBlock, UniformKind, UniformSchema, UniformSlot, UniformValue};
