use std::borrow::Cow;

use crate::animation::rotation::RotationRule;

use super::uniform::{UniformSchema, UniformSlot, UniformValue};

/// Default look of a program: colors plus the scalar knobs its shader reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePreset {
    /// Main color.
    pub primary: [f32; 3],
    /// Secondary color.
    pub secondary: [f32; 3],
    /// Highlight color.
    pub accent: [f32; 3],
    /// Breathing angular speed.
    pub breathing_speed: f32,
    /// Vertex displacement scale.
    pub distortion_scale: f32,
    /// Noise lattice frequency.
    pub noise_frequency: f32,
    /// Brightness multiplier.
    pub intensity: f32,
}

impl StylePreset {
    /// Schema declaring every preset-backed slot with this preset's values,
    /// plus zeroed dynamic slots.
    pub fn schema(&self) -> UniformSchema {
        UniformSchema::new()
            .with(UniformSlot::ColorPrimary, UniformValue::Vec3(self.primary))
            .with(UniformSlot::ColorSecondary, UniformValue::Vec3(self.secondary))
            .with(UniformSlot::ColorAccent, UniformValue::Vec3(self.accent))
            .with(UniformSlot::Intensity, UniformValue::Float(self.intensity))
            .with(
                UniformSlot::BreathingSpeed,
                UniformValue::Float(self.breathing_speed),
            )
            .with(
                UniformSlot::DistortionScale,
                UniformValue::Float(self.distortion_scale),
            )
            .with(
                UniformSlot::NoiseFrequency,
                UniformValue::Float(self.noise_frequency),
            )
            .with(UniformSlot::Time, UniformValue::Float(0.0))
            .with(UniformSlot::CapitalRatio, UniformValue::Float(0.0))
            .with(UniformSlot::Mood, UniformValue::Float(0.0))
            .with(UniformSlot::Hover, UniformValue::Float(0.0))
            .with(UniformSlot::Pulse, UniformValue::Float(0.0))
            .with(UniformSlot::AudioLevel, UniformValue::Float(0.0))
            .with(UniformSlot::Mouse, UniformValue::Vec2([0.0, 0.0]))
    }
}

/// Immutable description of one orb shader program.
///
/// Registered once at startup and shared by every orb using it.
#[derive(Debug, Clone)]
pub struct ShaderProgramDescriptor {
    /// Stable lookup key (e.g. `"boveda_monte"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// WGSL module with `vs_main` and `fs_main`.
    pub source: Cow<'static, str>,
    /// Path reported in composer diagnostics.
    pub file_path: String,
    /// Uniform declarations and defaults.
    pub schema: UniformSchema,
    /// Default look.
    pub preset: StylePreset,
    /// Orientation over time.
    pub rotation: RotationRule,
}

impl ShaderProgramDescriptor {
    /// Descriptor whose schema is derived from `preset`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<Cow<'static, str>>,
        file_path: impl Into<String>,
        preset: StylePreset,
        rotation: RotationRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: source.into(),
            file_path: file_path.into(),
            schema: preset.schema(),
            preset,
            rotation,
        }
    }

    /// Replace the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: UniformSchema) -> Self {
        self.schema = schema;
        self
    }
}
