//! The per-frame orb animation rule.
//!
//! A plain function from (frame input, orb state, style) to a fully
//! populated [`UniformBlock`] plus transform. It touches nothing outside its
//! arguments and cannot fail: every input is clamped and NaN-guarded.

use glam::{Mat4, Quat, Vec3};

use super::breathing::Breathing;
use crate::shader::{ShaderProgramDescriptor, StylePreset, UniformBlock};
use crate::util::math::{clamp01, finite_or};

/// Read-only values shared by every orb in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Frame clock seconds.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Pointer in NDC, `[-1, 1]²`; `None` when it is outside the viewport.
    pub pointer: Option<[f32; 2]>,
    /// Audio level in `[0, 1]`.
    pub audio_level: f32,
}

/// Tunables of the animation rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Scale at rest.
    pub base_scale: f32,
    /// Relative breathing amplitude.
    pub breathing_amplitude: f32,
    /// Scale multiplier while selected.
    pub selected_scale: f32,
    /// Intensity multiplier while selected.
    pub selected_intensity: f32,
    /// Hover easing rate (per second).
    pub hover_rate: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            breathing_amplitude: 0.05,
            selected_scale: 1.1,
            selected_intensity: 1.5,
            hover_rate: 8.0,
        }
    }
}

/// Per-orb state the rule reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationInputs {
    /// Random phase offset in `[0, 2π)`.
    pub phase: f32,
    /// Bound value in `[0, 1]`.
    pub capital_ratio: f32,
    /// Income/expense balance in `[-1, 1]`.
    pub mood: f32,
    /// Whether the orb is selected.
    pub selected: bool,
    /// Whether the pointer is over the orb.
    pub hovered: bool,
    /// Eased hover from the previous frame.
    pub hover: f32,
    /// Current pulse value (already ticked this frame).
    pub pulse: f32,
    /// World position.
    pub position: Vec3,
    /// Extra orientation composed after the program's rotation rule.
    pub extra_rotation: Quat,
}

/// Result of one application of the rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedFrame {
    /// Uniform scale.
    pub scale: f32,
    /// Orientation.
    pub rotation: Quat,
    /// Eased hover to carry into the next frame.
    pub hover: f32,
    /// Block ready for upload.
    pub block: UniformBlock,
}

/// Compute one orb's frame.
///
/// ```text
/// scale = base × (1 + sin(t × speed + phase) × amp) × (selected ? 1.1 : 1) × (1 + pulse)
/// ```
pub fn animate(
    program: &ShaderProgramDescriptor,
    preset: &StylePreset,
    params: &AnimationParams,
    frame: &FrameInput,
    inputs: &AnimationInputs,
) -> AnimatedFrame {
    let t = finite_or(frame.elapsed, 0.0);
    let delta = finite_or(frame.delta, 0.0).max(0.0);
    let pulse = clamp01(inputs.pulse);

    let breathing = Breathing {
        base_scale: params.base_scale,
        speed: preset.breathing_speed,
        amplitude: params.breathing_amplitude,
    };
    let selected_scale = if inputs.selected {
        params.selected_scale
    } else {
        1.0
    };
    let scale = finite_or(
        breathing.scale_at(t, finite_or(inputs.phase, 0.0))
            * selected_scale
            * (1.0 + pulse),
        params.base_scale,
    );

    let target_hover = if inputs.hovered { 1.0 } else { 0.0 };
    let ease = (params.hover_rate * delta).clamp(0.0, 1.0);
    let prev_hover = clamp01(inputs.hover);
    let hover = clamp01(prev_hover + (target_hover - prev_hover) * ease);

    let rotation = (program.rotation.quat_at(t) * inputs.extra_rotation).normalize();
    let rotation = if rotation.is_finite() {
        rotation
    } else {
        Quat::IDENTITY
    };
    let position = if inputs.position.is_finite() {
        inputs.position
    } else {
        Vec3::ZERO
    };

    let mut block = UniformBlock::from_schema(&program.schema);
    block.model =
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
            .to_cols_array_2d();
    block.time = t;
    block.color_primary = preset.primary;
    block.color_secondary = preset.secondary;
    block.color_accent = preset.accent;
    block.intensity = preset.intensity
        * if inputs.selected {
            params.selected_intensity
        } else {
            1.0
        };
    block.capital_ratio = clamp01(inputs.capital_ratio);
    block.mood = finite_or(inputs.mood, 0.0).clamp(-1.0, 1.0);
    block.hover = hover;
    block.pulse = pulse;
    let [mx, my] = frame.pointer.unwrap_or_default();
    block.mouse = [
        finite_or(mx, 0.0).clamp(-1.0, 1.0),
        finite_or(my, 0.0).clamp(-1.0, 1.0),
    ];
    block.audio_level = clamp01(frame.audio_level);
    block.breathing_speed = preset.breathing_speed;
    block.distortion_scale = preset.distortion_scale;
    block.noise_frequency = preset.noise_frequency;
    let _ = block.sanitize(&program.schema);

    AnimatedFrame {
        scale,
        rotation,
        hover,
        block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{BuiltinStyle, UniformSlot};

    fn inputs() -> AnimationInputs {
        AnimationInputs {
            phase: 0.0,
            capital_ratio: 0.5,
            mood: 0.0,
            selected: false,
            hovered: false,
            hover: 0.0,
            pulse: 0.0,
            position: Vec3::new(1.0, 2.0, 3.0),
            extra_rotation: Quat::IDENTITY,
        }
    }

    fn run(inputs: &AnimationInputs, frame: &FrameInput) -> AnimatedFrame {
        let program = BuiltinStyle::BovedaMonte.descriptor();
        animate(
            &program,
            &program.preset,
            &AnimationParams::default(),
            frame,
            inputs,
        )
    }

    #[test]
    fn scale_follows_formula() {
        let frame = FrameInput {
            elapsed: 2.0,
            ..Default::default()
        };
        let mut i = inputs();
        i.phase = 0.7;
        i.selected = true;
        i.pulse = 0.5;
        let out = run(&i, &frame);
        let speed = BuiltinStyle::BovedaMonte.preset().breathing_speed;
        let expected = (1.0 + (2.0 * speed + 0.7_f32).sin() * 0.05) * 1.1 * 1.5;
        assert!((out.scale - expected).abs() < 1e-5);
    }

    #[test]
    fn selection_boosts_intensity() {
        let frame = FrameInput::default();
        let base = run(&inputs(), &frame).block.intensity;
        let mut i = inputs();
        i.selected = true;
        let boosted = run(&i, &frame).block.intensity;
        assert!((boosted - base * 1.5).abs() < 1e-6);
    }

    #[test]
    fn nan_inputs_never_reach_uniforms() {
        let frame = FrameInput {
            elapsed: f32::NAN,
            delta: f32::INFINITY,
            pointer: Some([f32::NAN, 5.0]),
            audio_level: f32::NAN,
        };
        let mut i = inputs();
        i.capital_ratio = f32::NAN;
        i.mood = f32::NEG_INFINITY;
        i.phase = f32::NAN;
        i.position = Vec3::NAN;
        let out = run(&i, &frame);
        for slot in UniformSlot::ALL {
            assert!(out.block.get(slot).is_finite(), "{slot:?}");
        }
        assert!(out.block.model.iter().flatten().all(|v| v.is_finite()));
        assert_eq!(out.block.mouse, [0.0, 1.0]);
        assert_eq!(out.block.capital_ratio, 0.0);
    }

    #[test]
    fn hover_eases_toward_target() {
        let frame = FrameInput {
            delta: 1.0 / 60.0,
            ..Default::default()
        };
        let mut i = inputs();
        i.hovered = true;
        let first = run(&i, &frame).hover;
        assert!(first > 0.0 && first < 1.0);
        i.hover = first;
        assert!(run(&i, &frame).hover > first);
    }

    #[test]
    fn model_carries_position() {
        let out = run(&inputs(), &FrameInput::default());
        let m = Mat4::from_cols_array_2d(&out.block.model);
        assert!(m.w_axis.truncate().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
    }
}
