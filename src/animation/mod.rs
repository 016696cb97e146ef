//! Orb animation: breathing, click pulses, rotation rules, the per-frame
//! rule that fills uniform blocks, and the agent style switch.

pub mod agent;
/// Sinusoidal breathing scale.
pub mod breathing;
/// Geometric-decay click pulse.
pub mod pulse;
/// Spin plus wobble orientation over time.
pub mod rotation;
pub mod rule;

pub use agent::{AgentState, StyleConfig, StyleSwitch};
pub use breathing::Breathing;
pub use pulse::{Pulse, PulsePhase};
pub use rotation::RotationRule;
pub use rule::{animate, AnimatedFrame, AnimationInputs, AnimationParams, FrameInput};
