use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::pulse::{PULSE_DECAY, PULSE_EPSILON};
use crate::animation::AnimationParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Breathing, selection, hover and pulse tunables.
pub struct AnimationOptions {
    /// Orb scale at rest.
    #[schemars(title = "Base Scale", range(min = 0.2, max = 3.0), extend("step" = 0.05))]
    pub base_scale: f32,
    /// Relative breathing amplitude.
    #[schemars(title = "Breathing", range(min = 0.0, max = 0.3), extend("step" = 0.01))]
    pub breathing_amplitude: f32,
    /// Scale multiplier while selected.
    #[schemars(title = "Selected Scale", range(min = 1.0, max = 1.5), extend("step" = 0.01))]
    pub selected_scale: f32,
    /// Intensity multiplier while selected.
    #[schemars(title = "Selected Glow", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub selected_intensity: f32,
    /// Per-tick pulse decay factor.
    #[schemars(skip)]
    pub pulse_decay: f32,
    /// Pulse cutoff below which it snaps to zero.
    #[schemars(skip)]
    pub pulse_epsilon: f32,
    /// Hover easing rate (per second).
    #[schemars(title = "Hover Rate", range(min = 1.0, max = 30.0), extend("step" = 0.5))]
    pub hover_rate: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            breathing_amplitude: 0.05,
            selected_scale: 1.1,
            selected_intensity: 1.5,
            pulse_decay: PULSE_DECAY,
            pulse_epsilon: PULSE_EPSILON,
            hover_rate: 8.0,
        }
    }
}

impl AnimationOptions {
    /// Parameters for [`animate`](crate::animation::animate).
    pub fn params(&self) -> AnimationParams {
        AnimationParams {
            base_scale: self.base_scale,
            breathing_amplitude: self.breathing_amplitude,
            selected_scale: self.selected_scale,
            selected_intensity: self.selected_intensity,
            hover_rate: self.hover_rate,
        }
    }
}
