//! Uniform slots, schemas, and the GPU-side per-orb uniform block.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Named uniform a shader program may read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UniformSlot {
    /// Frame clock seconds.
    Time,
    /// Overall brightness multiplier.
    Intensity,
    /// Bound business value normalized to `[0, 1]`.
    CapitalRatio,
    /// Income/expense balance in `[-1, 1]`.
    Mood,
    /// Eased hover amount in `[0, 1]`.
    Hover,
    /// Decaying click pulse in `[0, 1]`.
    Pulse,
    /// Microphone level in `[0, 1]` (agent orb).
    AudioLevel,
    /// Breathing angular speed.
    BreathingSpeed,
    /// Vertex displacement scale.
    DistortionScale,
    /// Noise lattice frequency.
    NoiseFrequency,
    /// Pointer in NDC.
    Mouse,
    /// Main color.
    ColorPrimary,
    /// Secondary color.
    ColorSecondary,
    /// Highlight color.
    ColorAccent,
}

/// Value shape of a [`UniformSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    /// `f32`
    Float,
    /// `vec2<f32>`
    Vec2,
    /// `vec3<f32>`
    Vec3,
}

impl UniformSlot {
    /// Every slot, in block order.
    pub const ALL: [Self; 14] = [
        Self::ColorPrimary,
        Self::Time,
        Self::ColorSecondary,
        Self::Intensity,
        Self::ColorAccent,
        Self::CapitalRatio,
        Self::Mouse,
        Self::Hover,
        Self::Pulse,
        Self::Mood,
        Self::AudioLevel,
        Self::BreathingSpeed,
        Self::DistortionScale,
        Self::NoiseFrequency,
    ];

    /// WGSL member name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Intensity => "intensity",
            Self::CapitalRatio => "capital_ratio",
            Self::Mood => "mood",
            Self::Hover => "hover",
            Self::Pulse => "pulse",
            Self::AudioLevel => "audio_level",
            Self::BreathingSpeed => "breathing_speed",
            Self::DistortionScale => "distortion_scale",
            Self::NoiseFrequency => "noise_frequency",
            Self::Mouse => "mouse",
            Self::ColorPrimary => "color_primary",
            Self::ColorSecondary => "color_secondary",
            Self::ColorAccent => "color_accent",
        }
    }

    /// Value shape.
    pub fn kind(self) -> UniformKind {
        match self {
            Self::Mouse => UniformKind::Vec2,
            Self::ColorPrimary | Self::ColorSecondary | Self::ColorAccent => {
                UniformKind::Vec3
            }
            _ => UniformKind::Float,
        }
    }

    /// Value used when a schema does not declare the slot.
    pub fn fallback(self) -> UniformValue {
        match self {
            Self::Intensity => UniformValue::Float(1.0),
            Self::BreathingSpeed => UniformValue::Float(1.0),
            Self::DistortionScale => UniformValue::Float(0.1),
            Self::NoiseFrequency => UniformValue::Float(2.0),
            Self::Mouse => UniformValue::Vec2([0.0; 2]),
            Self::ColorPrimary | Self::ColorSecondary | Self::ColorAccent => {
                UniformValue::Vec3([1.0; 3])
            }
            _ => UniformValue::Float(0.0),
        }
    }
}

/// A uniform value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    /// Scalar.
    Float(f32),
    /// Two components.
    Vec2([f32; 2]),
    /// Three components.
    Vec3([f32; 3]),
}

impl UniformValue {
    /// Shape of this value.
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::Float(_) => UniformKind::Float,
            Self::Vec2(_) => UniformKind::Vec2,
            Self::Vec3(_) => UniformKind::Vec3,
        }
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(v) => v.is_finite(),
            Self::Vec2(v) => v.iter().all(|c| c.is_finite()),
            Self::Vec3(v) => v.iter().all(|c| c.is_finite()),
        }
    }
}

/// Ordered `(slot, default)` declarations of a program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniformSchema {
    entries: Vec<(UniformSlot, UniformValue)>,
}

impl UniformSchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    #[must_use]
    pub fn with(mut self, slot: UniformSlot, default: UniformValue) -> Self {
        self.entries.push((slot, default));
        self
    }

    /// Declarations in order.
    pub fn entries(&self) -> &[(UniformSlot, UniformValue)] {
        &self.entries
    }

    /// Declared default for `slot`, or the slot's fallback.
    pub fn default_for(&self, slot: UniformSlot) -> UniformValue {
        self.entries
            .iter()
            .find(|(s, _)| *s == slot)
            .map_or_else(|| slot.fallback(), |(_, v)| *v)
    }

    /// Whether `slot` is declared.
    pub fn declares(&self, slot: UniformSlot) -> bool {
        self.entries.iter().any(|(s, _)| *s == slot)
    }

    /// Check that no slot is declared twice and every default matches its
    /// slot's shape and is finite.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        for (i, (slot, value)) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|(s, _)| s == slot) {
                return Err(format!("slot '{}' declared twice", slot.name()));
            }
            if value.kind() != slot.kind() {
                return Err(format!(
                    "slot '{}' expects {:?}, default is {:?}",
                    slot.name(),
                    slot.kind(),
                    value.kind()
                ));
            }
            if !value.is_finite() {
                return Err(format!(
                    "slot '{}' has a non-finite default",
                    slot.name()
                ));
            }
        }
        Ok(())
    }
}

/// Per-orb uniform block, bit-compatible with WGSL `OrbUniforms`
/// (`@group(1) @binding(0)`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    /// Object-to-world transform (column-major).
    pub model: [[f32; 4]; 4],
    /// Main color.
    pub color_primary: [f32; 3],
    /// Frame clock seconds.
    pub time: f32,
    /// Secondary color.
    pub color_secondary: [f32; 3],
    /// Brightness multiplier.
    pub intensity: f32,
    /// Highlight color.
    pub color_accent: [f32; 3],
    /// Bound value in `[0, 1]`.
    pub capital_ratio: f32,
    /// Pointer in NDC.
    pub mouse: [f32; 2],
    /// Eased hover in `[0, 1]`.
    pub hover: f32,
    /// Click pulse in `[0, 1]`.
    pub pulse: f32,
    /// Income/expense balance in `[-1, 1]`.
    pub mood: f32,
    /// Audio level in `[0, 1]`.
    pub audio_level: f32,
    /// Breathing angular speed.
    pub breathing_speed: f32,
    /// Vertex displacement scale.
    pub distortion_scale: f32,
    /// Noise lattice frequency.
    pub noise_frequency: f32,
    /// Padding to a 16-byte multiple.
    pub _pad0: f32,
    /// Padding.
    pub _pad1: f32,
    /// Padding.
    pub _pad2: f32,
}

impl UniformBlock {
    /// WGSL member names in declaration order.
    pub const FIELD_NAMES: [&'static str; 18] = [
        "model",
        "color_primary",
        "time",
        "color_secondary",
        "intensity",
        "color_accent",
        "capital_ratio",
        "mouse",
        "hover",
        "pulse",
        "mood",
        "audio_level",
        "breathing_speed",
        "distortion_scale",
        "noise_frequency",
        "_pad0",
        "_pad1",
        "_pad2",
    ];

    /// Block with every slot seeded from `schema` and an identity model
    /// matrix.
    pub fn from_schema(schema: &UniformSchema) -> Self {
        let mut block = Self::zeroed();
        block.model = Mat4::IDENTITY.to_cols_array_2d();
        for slot in UniformSlot::ALL {
            let _ = block.set(slot, schema.default_for(slot));
        }
        block
    }

    /// Write `value` into `slot`. Returns `false` (and writes nothing) when
    /// the value's shape does not match the slot.
    pub fn set(&mut self, slot: UniformSlot, value: UniformValue) -> bool {
        match (slot, value) {
            (UniformSlot::Mouse, UniformValue::Vec2(v)) => self.mouse = v,
            (UniformSlot::ColorPrimary, UniformValue::Vec3(v)) => {
                self.color_primary = v;
            }
            (UniformSlot::ColorSecondary, UniformValue::Vec3(v)) => {
                self.color_secondary = v;
            }
            (UniformSlot::ColorAccent, UniformValue::Vec3(v)) => {
                self.color_accent = v;
            }
            (slot, UniformValue::Float(v)) => match self.scalar_mut(slot) {
                Some(field) => *field = v,
                None => return false,
            },
            _ => return false,
        }
        true
    }

    /// Current value of `slot`.
    pub fn get(&self, slot: UniformSlot) -> UniformValue {
        match slot {
            UniformSlot::Mouse => UniformValue::Vec2(self.mouse),
            UniformSlot::ColorPrimary => UniformValue::Vec3(self.color_primary),
            UniformSlot::ColorSecondary => {
                UniformValue::Vec3(self.color_secondary)
            }
            UniformSlot::ColorAccent => UniformValue::Vec3(self.color_accent),
            UniformSlot::Time => UniformValue::Float(self.time),
            UniformSlot::Intensity => UniformValue::Float(self.intensity),
            UniformSlot::CapitalRatio => {
                UniformValue::Float(self.capital_ratio)
            }
            UniformSlot::Mood => UniformValue::Float(self.mood),
            UniformSlot::Hover => UniformValue::Float(self.hover),
            UniformSlot::Pulse => UniformValue::Float(self.pulse),
            UniformSlot::AudioLevel => UniformValue::Float(self.audio_level),
            UniformSlot::BreathingSpeed => {
                UniformValue::Float(self.breathing_speed)
            }
            UniformSlot::DistortionScale => {
                UniformValue::Float(self.distortion_scale)
            }
            UniformSlot::NoiseFrequency => {
                UniformValue::Float(self.noise_frequency)
            }
        }
    }

    fn scalar_mut(&mut self, slot: UniformSlot) -> Option<&mut f32> {
        Some(match slot {
            UniformSlot::Time => &mut self.time,
            UniformSlot::Intensity => &mut self.intensity,
            UniformSlot::CapitalRatio => &mut self.capital_ratio,
            UniformSlot::Mood => &mut self.mood,
            UniformSlot::Hover => &mut self.hover,
            UniformSlot::Pulse => &mut self.pulse,
            UniformSlot::AudioLevel => &mut self.audio_level,
            UniformSlot::BreathingSpeed => &mut self.breathing_speed,
            UniformSlot::DistortionScale => &mut self.distortion_scale,
            UniformSlot::NoiseFrequency => &mut self.noise_frequency,
            _ => return None,
        })
    }

    /// Replace every non-finite slot with its schema default and a
    /// non-finite model matrix with identity. Returns how many values were
    /// replaced.
    pub fn sanitize(&mut self, schema: &UniformSchema) -> usize {
        let mut replaced = 0;
        for slot in UniformSlot::ALL {
            if !self.get(slot).is_finite() {
                let _ = self.set(slot, schema.default_for(slot));
                replaced += 1;
            }
        }
        if self.model.iter().flatten().any(|v| !v.is_finite()) {
            self.model = Mat4::IDENTITY.to_cols_array_2d();
            replaced += 1;
        }
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> UniformSchema {
        UniformSchema::new()
            .with(UniformSlot::Intensity, UniformValue::Float(1.3))
            .with(UniformSlot::ColorPrimary, UniformValue::Vec3([1.0, 0.5, 0.0]))
    }

    #[test]
    fn block_matches_wgsl_size() {
        assert_eq!(size_of::<UniformBlock>(), 160);
        assert_eq!(size_of::<UniformBlock>() % 16, 0);
    }

    #[test]
    fn from_schema_seeds_every_slot() {
        let block = UniformBlock::from_schema(&schema());
        assert_eq!(block.intensity, 1.3);
        assert_eq!(block.color_primary, [1.0, 0.5, 0.0]);
        assert_eq!(block.get(UniformSlot::NoiseFrequency), UniformValue::Float(2.0));
        for slot in UniformSlot::ALL {
            assert!(block.get(slot).is_finite());
        }
    }

    #[test]
    fn set_rejects_wrong_shape() {
        let mut block = UniformBlock::from_schema(&schema());
        assert!(!block.set(UniformSlot::Time, UniformValue::Vec2([1.0, 2.0])));
        assert!(!block.set(UniformSlot::Mouse, UniformValue::Float(1.0)));
        assert!(block.set(UniformSlot::Mouse, UniformValue::Vec2([0.5, -0.5])));
        assert_eq!(block.mouse, [0.5, -0.5]);
    }

    #[test]
    fn sanitize_restores_defaults() {
        let mut block = UniformBlock::from_schema(&schema());
        block.intensity = f32::NAN;
        block.color_primary[1] = f32::INFINITY;
        block.model[3][0] = f32::NAN;
        assert_eq!(block.sanitize(&schema()), 3);
        assert_eq!(block.intensity, 1.3);
        assert_eq!(block.color_primary, [1.0, 0.5, 0.0]);
        assert_eq!(block.model, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn validate_catches_duplicates_and_shapes() {
        assert!(schema().validate().is_ok());
        let dup = schema().with(UniformSlot::Intensity, UniformValue::Float(2.0));
        assert!(dup.validate().unwrap_err().contains("twice"));
        let shape =
            UniformSchema::new().with(UniformSlot::Mouse, UniformValue::Float(0.0));
        assert!(shape.validate().is_err());
        let nan =
            UniformSchema::new().with(UniformSlot::Hover, UniformValue::Float(f32::NAN));
        assert!(nan.validate().is_err());
    }

    #[test]
    fn field_names_cover_every_slot() {
        for slot in UniformSlot::ALL {
            assert!(UniformBlock::FIELD_NAMES.contains(&slot.name()));
        }
    }

    #[test]
    fn untagged_values_from_json() {
        let v: UniformValue = serde_json::from_str("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(v.kind(), UniformKind::Vec3);
        let v: UniformValue = serde_json::from_str("0.5").unwrap();
        assert_eq!(v, UniformValue::Float(0.5));
    }
}
