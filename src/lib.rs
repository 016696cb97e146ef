// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Shader-driven animated orbs for dashboard visuals, built on wgpu.
//!
//! Each orb is a UV sphere drawn by a procedural WGSL program whose uniform
//! block is recomputed every frame from the frame clock, the orb's phase
//! offset, its bound business value and its interaction state. The frame
//! then runs through bloom → chromatic aberration → vignette.
//!
//! # Key entry points
//!
//! - [`engine::OrbEngine`] - scene + renderer, per-frame callback
//! - [`scene::Scene`] - ordered orbs, layouts, picking, label anchors
//! - [`shader::ShaderRegistry`] - validated catalog of orb programs
//! - [`animation::animate`] - the per-orb animation rule
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Everything above the [`gpu`] and [`renderer`] modules is plain CPU code
//! with no GPU dependency, so the animation rule, layouts, style switch and
//! uniform validation are unit-tested headless. WGSL programs are composed
//! with `naga_oil`; the registry can reflect each program's `OrbUniforms`
//! struct and reject it if it disagrees with [`shader::UniformBlock`].

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{OrbCommand, OrbEngine};
pub use error::OrbisError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use scene::{OrbId, Scene};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
