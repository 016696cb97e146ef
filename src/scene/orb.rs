//! One animated orb: program reference, uniform block, transform and the
//! transient per-orb state the animation rule reads.

use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;

use glam::{Quat, Vec3};
use rand::Rng;

use super::binding::{BalanceSnapshot, ValueBinding};
use crate::animation::{
    animate, AnimationInputs, AnimationParams, FrameInput, Pulse, StyleSwitch,
};
use crate::shader::{ShaderProgramDescriptor, ShaderRegistry, StylePreset, UniformBlock};
use crate::util::math::finite_or;

/// Stable handle of an orb within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrbId(pub u32);

impl fmt::Display for OrbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "orb#{}", self.0)
    }
}

/// Per-orb deviations from the program's preset.
///
/// Every `None` keeps the program default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbOverrides {
    /// Primary color.
    pub primary: Option<[f32; 3]>,
    /// Secondary color.
    pub secondary: Option<[f32; 3]>,
    /// Accent color.
    pub accent: Option<[f32; 3]>,
    /// Glow intensity.
    pub intensity: Option<f32>,
    /// Breathing angular speed.
    pub breathing_speed: Option<f32>,
    /// Vertex displacement amount.
    pub distortion_scale: Option<f32>,
    /// Noise frequency.
    pub noise_frequency: Option<f32>,
    /// Multiplier on the scene's base scale.
    pub scale: Option<f32>,
    /// Fixed phase offset instead of a random one.
    pub phase: Option<f32>,
    /// Fixed position; the orb is then left alone by layouts.
    pub position: Option<Vec3>,
    /// Where `capital_ratio` comes from.
    pub binding: Option<ValueBinding>,
}

impl OrbOverrides {
    /// `preset` with the overridden fields replaced.
    pub fn apply(&self, preset: &StylePreset) -> StylePreset {
        StylePreset {
            primary: self.primary.unwrap_or(preset.primary),
            secondary: self.secondary.unwrap_or(preset.secondary),
            accent: self.accent.unwrap_or(preset.accent),
            breathing_speed: self.breathing_speed.unwrap_or(preset.breathing_speed),
            distortion_scale: self.distortion_scale.unwrap_or(preset.distortion_scale),
            noise_frequency: self.noise_frequency.unwrap_or(preset.noise_frequency),
            intensity: self.intensity.unwrap_or(preset.intensity),
        }
    }
}

/// Placement of an orb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Orientation.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            rotation: Quat::IDENTITY,
        }
    }
}

/// An orb in a scene.
#[derive(Debug, Clone)]
pub struct OrbInstance {
    id: OrbId,
    label: String,
    program: Arc<ShaderProgramDescriptor>,
    preset: StylePreset,
    block: UniformBlock,
    transform: Transform,
    phase: f32,
    scale: f32,
    pinned: bool,
    binding: Option<ValueBinding>,
    explicit_accent: bool,
    capital_ratio: f32,
    mood: f32,
    selected: bool,
    hovered: bool,
    hover: f32,
    pulse: Pulse,
    agent: Option<StyleSwitch>,
}

impl OrbInstance {
    /// Orb drawing `style_id` (unknown ids fall back to the registry
    /// default). The phase offset is drawn from `rng` unless overridden.
    pub fn new<R: Rng>(
        id: OrbId,
        label: impl Into<String>,
        registry: &ShaderRegistry,
        style_id: &str,
        overrides: &OrbOverrides,
        rng: &mut R,
    ) -> Self {
        let program = registry.get(style_id);
        let preset = overrides.apply(&program.preset);
        let phase = overrides
            .phase
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| rng.random_range(0.0..TAU));
        let mut block = UniformBlock::from_schema(&program.schema);
        block.color_primary = preset.primary;
        block.color_secondary = preset.secondary;
        block.color_accent = preset.accent;
        block.intensity = preset.intensity;
        let transform = Transform {
            position: overrides.position.unwrap_or(Vec3::ZERO),
            ..Transform::default()
        };
        Self {
            id,
            label: label.into(),
            program,
            preset,
            block,
            transform,
            phase,
            scale: finite_or(overrides.scale.unwrap_or(1.0), 1.0).max(0.0),
            pinned: overrides.position.is_some(),
            binding: overrides.binding,
            explicit_accent: overrides.accent.is_some(),
            capital_ratio: 0.0,
            mood: 0.0,
            selected: false,
            hovered: false,
            hover: 0.0,
            pulse: Pulse::default(),
            agent: None,
        }
    }

    /// Drive colors, intensity and spin from an agent style switch.
    #[must_use]
    pub fn with_agent(mut self, switch: StyleSwitch) -> Self {
        self.agent = Some(switch);
        self
    }

    /// Use `pulse` (decay/epsilon) instead of the default pulse.
    #[must_use]
    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulse = pulse;
        self
    }

    /// Advance one frame: tick the pulse and the agent switch, then run the
    /// animation rule. Never fails.
    pub fn update(&mut self, frame: &FrameInput, params: &AnimationParams) {
        let _ = self.pulse.tick();
        let mut preset = self.preset;
        let mut extra_rotation = Quat::IDENTITY;
        if let Some(agent) = &mut self.agent {
            agent.update(frame.delta);
            let look = agent.current();
            preset.primary = look.primary;
            preset.secondary = look.secondary;
            preset.accent = look.accent;
            preset.intensity = look.intensity;
            preset.breathing_speed = look.pulse_speed;
            extra_rotation = Quat::from_rotation_y(agent.rotation());
        }

        let params = AnimationParams {
            base_scale: params.base_scale * self.scale,
            ..*params
        };
        let inputs = AnimationInputs {
            phase: self.phase,
            capital_ratio: self.capital_ratio,
            mood: self.mood,
            selected: self.selected,
            hovered: self.hovered,
            hover: self.hover,
            pulse: self.pulse.value(),
            position: self.transform.position,
            extra_rotation,
        };
        let out = animate(&self.program, &preset, &params, frame, &inputs);
        self.block = out.block;
        self.hover = out.hover;
        self.transform.scale = out.scale;
        self.transform.rotation = out.rotation;
    }

    /// Take `capital_ratio`, mood and brand accent from `snapshot`.
    /// `None` means no data for this orb.
    pub fn apply_snapshot(&mut self, snapshot: Option<&BalanceSnapshot>) {
        if let Some(binding) = &self.binding {
            self.capital_ratio = binding.ratio(snapshot);
        }
        if let Some(snapshot) = snapshot {
            self.mood = snapshot.mood();
            if !self.explicit_accent {
                if let Some(color) = snapshot.brand_color() {
                    self.preset.accent = color;
                }
            }
        }
    }

    /// Reset pulse, hover and agent rotation.
    pub fn reset_transient(&mut self) {
        self.pulse.reset();
        self.hover = 0.0;
        self.hovered = false;
        if let Some(agent) = &mut self.agent {
            *agent = StyleSwitch::new(agent.state(), agent.lerp_rate());
        }
    }

    /// Fire a pulse.
    pub fn pulse(&mut self) {
        self.pulse.trigger();
    }

    /// Handle.
    pub fn id(&self) -> OrbId {
        self.id
    }

    /// Display label; also the entity id snapshots are matched against.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Program drawing this orb.
    pub fn program(&self) -> &Arc<ShaderProgramDescriptor> {
        &self.program
    }

    /// Effective preset (program defaults + overrides + snapshot accent).
    pub fn preset(&self) -> &StylePreset {
        &self.preset
    }

    /// Uniforms produced by the last [`update`](Self::update).
    pub fn block(&self) -> &UniformBlock {
        &self.block
    }

    /// Current transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Move the orb. Ignored for non-finite input.
    pub fn set_position(&mut self, position: Vec3) {
        if position.is_finite() {
            self.transform.position = position;
        }
    }

    /// Whether layouts leave this orb where it is.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Phase offset in `[0, 2π)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Bound value in `[0, 1]`.
    pub fn capital_ratio(&self) -> f32 {
        self.capital_ratio
    }

    /// Pulse state.
    pub fn pulse_state(&self) -> &Pulse {
        &self.pulse
    }

    /// Agent style switch, if this is an agent orb.
    pub fn agent(&self) -> Option<&StyleSwitch> {
        self.agent.as_ref()
    }

    /// Mutable agent style switch.
    pub fn agent_mut(&mut self) -> Option<&mut StyleSwitch> {
        self.agent.as_mut()
    }

    /// Whether the orb is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Select or deselect.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Whether the pointer is over the orb.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover target; the uniform eases toward it.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Radius used for picking (unit sphere × current scale).
    pub fn pick_radius(&self) -> f32 {
        self.transform.scale.max(self.scale * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::animation::AgentState;

    fn registry() -> ShaderRegistry {
        ShaderRegistry::builtin().unwrap()
    }

    fn orb(overrides: &OrbOverrides) -> OrbInstance {
        let mut rng = StdRng::seed_from_u64(7);
        OrbInstance::new(OrbId(1), "profit", &registry(), "profit", overrides, &mut rng)
    }

    #[test]
    fn phase_is_seeded_and_in_range() {
        let a = orb(&OrbOverrides::default());
        let b = orb(&OrbOverrides::default());
        assert_eq!(a.phase(), b.phase());
        assert!((0.0..TAU).contains(&a.phase()));
    }

    #[test]
    fn unknown_style_uses_default_program() {
        let mut rng = StdRng::seed_from_u64(1);
        let reg = registry();
        let orb = OrbInstance::new(
            OrbId(0),
            "x",
            &reg,
            "nonexistent_bank",
            &OrbOverrides::default(),
            &mut rng,
        );
        assert_eq!(orb.program().id, reg.default_id());
    }

    #[test]
    fn overrides_replace_preset_fields() {
        let o = orb(&OrbOverrides {
            primary: Some([1.0, 0.0, 0.0]),
            intensity: Some(2.0),
            ..OrbOverrides::default()
        });
        assert_eq!(o.preset().primary, [1.0, 0.0, 0.0]);
        assert_eq!(o.preset().intensity, 2.0);
        assert_eq!(o.block().color_primary, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn update_writes_block_and_selected_intensity() {
        let mut o = orb(&OrbOverrides {
            phase: Some(0.0),
            ..OrbOverrides::default()
        });
        let base = o.preset().intensity;
        o.set_selected(true);
        o.update(
            &FrameInput {
                elapsed: 0.0,
                delta: 0.016,
                ..FrameInput::default()
            },
            &AnimationParams::default(),
        );
        assert!((o.block().intensity - base * 1.5).abs() < 1e-6);
        assert!((o.transform().scale - 1.1).abs() < 1e-6);
    }

    #[test]
    fn pulse_decays_through_update() {
        let mut o = orb(&OrbOverrides::default());
        o.pulse();
        let frame = FrameInput::default();
        o.update(&frame, &AnimationParams::default());
        assert!((o.block().pulse - 0.95).abs() < 1e-6);
        for _ in 0..100 {
            o.update(&frame, &AnimationParams::default());
        }
        assert_eq!(o.block().pulse, 0.0);
    }

    #[test]
    fn snapshot_feeds_binding_and_mood() {
        let mut o = orb(&OrbOverrides {
            binding: Some(ValueBinding::CapitalRatio { max_balance: 100.0 }),
            ..OrbOverrides::default()
        });
        let snap = BalanceSnapshot {
            id: "profit".to_owned(),
            current_balance: 50.0,
            total_income: 30.0,
            total_expenses: 10.0,
            color: Some("#ff0000".to_owned()),
        };
        o.apply_snapshot(Some(&snap));
        assert_eq!(o.capital_ratio(), 0.5);
        assert_eq!(o.preset().accent, [1.0, 0.0, 0.0]);
        o.update(&FrameInput::default(), &AnimationParams::default());
        assert!((o.block().mood - 0.5).abs() < 1e-6);
    }

    #[test]
    fn agent_orb_follows_switch() {
        let mut o = orb(&OrbOverrides::default())
            .with_agent(StyleSwitch::new(AgentState::Error, 3.0));
        o.update(
            &FrameInput {
                delta: 0.5,
                ..FrameInput::default()
            },
            &AnimationParams::default(),
        );
        assert_eq!(o.block().color_primary, AgentState::Error.style().primary);
        assert!(o.agent().is_some_and(|a| a.rotation() > 0.0));
    }

    #[test]
    fn pinned_orbs_keep_their_position() {
        let o = orb(&OrbOverrides {
            position: Some(Vec3::new(1.0, 2.0, 3.0)),
            ..OrbOverrides::default()
        });
        assert!(o.is_pinned());
        assert_eq!(o.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
