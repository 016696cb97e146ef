//! Agent orb visual states and the smoothed switch between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shader::UniformBlock;
use crate::util::color::{CRIMSON, GOLD, MINT, PINK, VIOLET};
use crate::util::math::{finite_or, lerp, lerp3};

/// Default color/intensity convergence rate (per second).
pub const DEFAULT_LERP_RATE: f32 = 3.0;

/// What the assistant is doing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Waiting.
    #[default]
    Idle,
    /// Capturing voice input.
    Listening,
    /// Producing an answer.
    Thinking,
    /// Speaking the answer.
    Speaking,
    /// Something failed.
    Error,
    /// Action completed.
    Success,
}

impl AgentState {
    /// Every state, in cycling order.
    pub const ALL: [Self; 6] = [
        Self::Idle,
        Self::Listening,
        Self::Thinking,
        Self::Speaking,
        Self::Error,
        Self::Success,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Thinking => "thinking",
            Self::Speaking => "speaking",
            Self::Error => "error",
            Self::Success => "success",
        }
    }

    /// Parse `s`, falling back to [`AgentState::Idle`] with a warning.
    pub fn parse_or_idle(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::warn!("unknown agent state '{s}', using idle");
            Self::Idle
        })
    }

    /// Next state in [`ALL`](Self::ALL) order, wrapping.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Target look for this state.
    pub fn style(self) -> StyleConfig {
        let (intensity, primary, secondary, accent, rotation_speed, pulse_speed) =
            match self {
                Self::Idle => (0.6, VIOLET, GOLD, PINK, 0.3, 1.0),
                Self::Listening => (0.8, GOLD, VIOLET, PINK, 0.5, 1.5),
                Self::Thinking => (1.0, VIOLET, PINK, GOLD, 1.2, 2.5),
                Self::Speaking => (1.2, GOLD, VIOLET, PINK, 0.8, 2.0),
                Self::Error => (1.5, PINK, CRIMSON, VIOLET, 0.2, 4.0),
                Self::Success => (1.3, MINT, GOLD, VIOLET, 0.6, 1.2),
            };
        StyleConfig {
            primary,
            secondary,
            accent,
            intensity,
            rotation_speed,
            pulse_speed,
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown agent state '{s}'"))
    }
}

/// Look of the agent orb in one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    /// Main color.
    pub primary: [f32; 3],
    /// Secondary color.
    pub secondary: [f32; 3],
    /// Highlight color.
    pub accent: [f32; 3],
    /// Brightness multiplier.
    pub intensity: f32,
    /// Rotation speed (rad/s before the 0.5 damping).
    pub rotation_speed: f32,
    /// Breathing speed.
    pub pulse_speed: f32,
}

/// Smoothed transition between agent styles.
///
/// `set_state` only moves the target; `update` walks colors and intensity
/// toward it with factor `clamp(rate × delta, 0, 1)`.
#[derive(Debug, Clone)]
pub struct StyleSwitch {
    state: AgentState,
    current: StyleConfig,
    rotation: f32,
    lerp_rate: f32,
}

impl Default for StyleSwitch {
    fn default() -> Self {
        Self::new(AgentState::Idle, DEFAULT_LERP_RATE)
    }
}

impl StyleSwitch {
    /// Switch resting in `state`.
    pub fn new(state: AgentState, lerp_rate: f32) -> Self {
        Self {
            state,
            current: state.style(),
            rotation: 0.0,
            lerp_rate: if lerp_rate.is_finite() && lerp_rate > 0.0 {
                lerp_rate
            } else {
                DEFAULT_LERP_RATE
            },
        }
    }

    /// Retarget. Takes effect gradually through [`update`](Self::update).
    pub fn set_state(&mut self, state: AgentState) {
        if state != self.state {
            log::debug!("agent state {} -> {}", self.state, state);
        }
        self.state = state;
    }

    /// Retarget from a string; unknown names select idle.
    pub fn set_state_str(&mut self, state: &str) {
        self.set_state(AgentState::parse_or_idle(state));
    }

    /// Target state.
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Interpolated look.
    pub fn current(&self) -> &StyleConfig {
        &self.current
    }

    /// Interpolation rate (per second).
    pub fn lerp_rate(&self) -> f32 {
        self.lerp_rate
    }

    /// Accumulated rotation angle (rad).
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Advance by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        let delta = finite_or(delta, 0.0).max(0.0);
        let target = self.state.style();
        let t = (self.lerp_rate * delta).clamp(0.0, 1.0);
        self.current.primary = lerp3(self.current.primary, target.primary, t);
        self.current.secondary =
            lerp3(self.current.secondary, target.secondary, t);
        self.current.accent = lerp3(self.current.accent, target.accent, t);
        self.current.intensity =
            lerp(self.current.intensity, target.intensity, t);
        self.current.rotation_speed = target.rotation_speed;
        self.current.pulse_speed = target.pulse_speed;
        self.rotation += target.rotation_speed * 0.5 * delta;
    }

    /// Write the interpolated look into `block`.
    pub fn apply_to(&self, block: &mut UniformBlock) {
        block.color_primary = self.current.primary;
        block.color_secondary = self.current.secondary;
        block.color_accent = self.current.accent;
        block.intensity = self.current.intensity;
        block.breathing_speed = self.current.pulse_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &StyleConfig, b: &StyleConfig) -> f32 {
        let c = |x: [f32; 3], y: [f32; 3]| {
            x.iter().zip(y).map(|(p, q)| (p - q).abs()).fold(0.0, f32::max)
        };
        c(a.primary, b.primary)
            .max(c(a.secondary, b.secondary))
            .max(c(a.accent, b.accent))
            .max((a.intensity - b.intensity).abs())
    }

    #[test]
    fn converges_idle_error_idle() {
        let mut switch = StyleSwitch::default();
        switch.set_state(AgentState::Error);
        for _ in 0..300 {
            switch.update(1.0 / 60.0);
        }
        assert!(distance(switch.current(), &AgentState::Error.style()) < 1e-3);

        switch.set_state(AgentState::Idle);
        for _ in 0..300 {
            switch.update(1.0 / 60.0);
        }
        assert!(distance(switch.current(), &AgentState::Idle.style()) < 1e-3);
    }

    #[test]
    fn set_state_alone_changes_nothing_visible() {
        let mut switch = StyleSwitch::default();
        let before = *switch.current();
        switch.set_state(AgentState::Thinking);
        assert_eq!(*switch.current(), before);
        assert_eq!(switch.state(), AgentState::Thinking);
    }

    #[test]
    fn huge_delta_snaps_without_overshoot() {
        let mut switch = StyleSwitch::default();
        switch.set_state(AgentState::Success);
        switch.update(10.0);
        assert!(distance(switch.current(), &AgentState::Success.style()) < 1e-6);
    }

    #[test]
    fn unknown_state_falls_back_to_idle() {
        assert_eq!(AgentState::parse_or_idle("dancing"), AgentState::Idle);
        assert_eq!(AgentState::parse_or_idle("Speaking"), AgentState::Speaking);
        let mut switch = StyleSwitch::new(AgentState::Error, 3.0);
        switch.set_state_str("???");
        assert_eq!(switch.state(), AgentState::Idle);
    }

    #[test]
    fn rotation_accumulates_half_speed() {
        let mut switch = StyleSwitch::new(AgentState::Thinking, 3.0);
        switch.update(2.0);
        assert!((switch.rotation() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn next_cycles_all_states() {
        let mut state = AgentState::Idle;
        for _ in 0..AgentState::ALL.len() {
            state = state.next();
        }
        assert_eq!(state, AgentState::Idle);
    }
}
