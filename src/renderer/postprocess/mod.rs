//! Post-processing: bloom, chromatic aberration and vignette, always in
//! that order.

pub mod chain;
pub mod post_process;
pub mod screen_pass;

pub use chain::{BloomParams, ChromaticParams, PostChain, PostPass, VignetteParams};
pub use post_process::PostProcessStack;
