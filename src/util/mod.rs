//! Shared helpers: frame clock, NaN-safe scalar math and the color palette.

pub mod color;
/// Monotonic per-frame time source.
pub mod frame_clock;
pub mod math;
