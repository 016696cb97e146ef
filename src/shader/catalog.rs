//! Built-in orb programs: the seven bank vault styles and the agent orb.

use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::descriptor::{ShaderProgramDescriptor, StylePreset};
use crate::animation::rotation::RotationRule;
use crate::util::color::{
    BLOOD_RED, CORNSILK, FOREST_GREEN, GOLD, GOLD_DARK, INDIGO, PINK, VIOLET,
};

/// Built-in program ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStyle {
    /// Gold liquid vault. The registry default.
    BovedaMonte,
    /// Gold with green currency bands.
    BovedaUsa,
    /// Pink core with golden bursts.
    Utilidades,
    /// Violet plasma. Older dashboard data calls this bank `fletes`.
    #[serde(alias = "fletes")]
    FleteSur,
    /// Red stone with glowing cracks.
    Azteca,
    /// Gold magnetic ripples.
    Leftie,
    /// Violet crystal with gold facets.
    Profit,
    /// Iridescent agent orb.
    LiquidMagnetic,
}

impl BuiltinStyle {
    /// Every built-in, bank styles first.
    pub const ALL: [Self; 8] = [
        Self::BovedaMonte,
        Self::BovedaUsa,
        Self::Utilidades,
        Self::FleteSur,
        Self::Azteca,
        Self::Leftie,
        Self::Profit,
        Self::LiquidMagnetic,
    ];

    /// The seven bank vault styles.
    pub const BANKS: [Self; 7] = [
        Self::BovedaMonte,
        Self::BovedaUsa,
        Self::Utilidades,
        Self::FleteSur,
        Self::Azteca,
        Self::Leftie,
        Self::Profit,
    ];

    /// Registry default.
    pub const DEFAULT: Self = Self::BovedaMonte;

    /// Registry id.
    pub fn id(self) -> &'static str {
        match self {
            Self::BovedaMonte => "boveda_monte",
            Self::BovedaUsa => "boveda_usa",
            Self::Utilidades => "utilidades",
            Self::FleteSur => "flete_sur",
            Self::Azteca => "azteca",
            Self::Leftie => "leftie",
            Self::Profit => "profit",
            Self::LiquidMagnetic => "liquid_magnetic",
        }
    }

    /// Display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::BovedaMonte => "Bóveda Monte",
            Self::BovedaUsa => "Bóveda USA",
            Self::Utilidades => "Utilidades",
            Self::FleteSur => "Flete Sur",
            Self::Azteca => "Azteca",
            Self::Leftie => "Leftie",
            Self::Profit => "Profit",
            Self::LiquidMagnetic => "Liquid Magnetic",
        }
    }

    fn shader(self) -> (&'static str, &'static str) {
        match self {
            Self::BovedaMonte => (
                include_str!("../../assets/shaders/orbs/gold_liquid.wgsl"),
                "orbs/gold_liquid.wgsl",
            ),
            Self::BovedaUsa => (
                include_str!("../../assets/shaders/orbs/emerald_reserve.wgsl"),
                "orbs/emerald_reserve.wgsl",
            ),
            Self::Utilidades => (
                include_str!("../../assets/shaders/orbs/golden_burst.wgsl"),
                "orbs/golden_burst.wgsl",
            ),
            Self::FleteSur => (
                include_str!("../../assets/shaders/orbs/violet_plasma.wgsl"),
                "orbs/violet_plasma.wgsl",
            ),
            Self::Azteca => (
                include_str!("../../assets/shaders/orbs/aztec_ember.wgsl"),
                "orbs/aztec_ember.wgsl",
            ),
            Self::Leftie => (
                include_str!("../../assets/shaders/orbs/magnetic_waves.wgsl"),
                "orbs/magnetic_waves.wgsl",
            ),
            Self::Profit => (
                include_str!("../../assets/shaders/orbs/imperial_crystal.wgsl"),
                "orbs/imperial_crystal.wgsl",
            ),
            Self::LiquidMagnetic => (
                include_str!("../../assets/shaders/orbs/liquid_magnetic.wgsl"),
                "orbs/liquid_magnetic.wgsl",
            ),
        }
    }

    /// Default colors and scalars.
    pub fn preset(self) -> StylePreset {
        let (primary, secondary, breathing_speed, distortion_scale, noise_frequency, intensity) =
            match self {
                Self::BovedaMonte => (GOLD, GOLD_DARK, 0.8, 0.12, 2.5, 1.1),
                Self::BovedaUsa => (GOLD, FOREST_GREEN, 0.9, 0.14, 2.8, 1.15),
                Self::Utilidades => (PINK, GOLD, 1.5, 0.2, 4.0, 1.3),
                Self::FleteSur => (VIOLET, INDIGO, 1.2, 0.15, 3.5, 1.2),
                Self::Azteca => (BLOOD_RED, GOLD, 0.6, 0.1, 2.0, 1.0),
                Self::Leftie => (GOLD, CORNSILK, 1.0, 0.18, 3.0, 1.4),
                Self::Profit => (VIOLET, GOLD, 1.1, 0.16, 3.2, 1.25),
                Self::LiquidMagnetic => (VIOLET, GOLD, 1.0, 0.3, 2.0, 0.6),
            };
        StylePreset {
            primary,
            secondary,
            accent: PINK,
            breathing_speed,
            distortion_scale,
            noise_frequency,
            intensity,
        }
    }

    /// Orientation over time.
    pub fn rotation(self) -> RotationRule {
        let spin = |x, y, z| RotationRule::spin(Vec3::new(x, y, z));
        match self {
            Self::BovedaMonte => spin(0.0, 0.3, 0.0)
                .with_wobble(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0)),
            Self::BovedaUsa => spin(0.2, 0.4, 0.0),
            Self::Utilidades => spin(0.3, 0.0, 0.5),
            Self::FleteSur => spin(0.3, 0.4, 0.0),
            Self::Azteca => spin(0.0, 0.5, 0.0),
            Self::Leftie => RotationRule::STILL
                .with_wobble(Vec3::new(0.3, 0.0, 0.2), Vec3::new(1.0, 0.0, 0.7)),
            Self::Profit => spin(0.0, 0.4, 0.0)
                .with_wobble(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.3, 0.0, 0.0)),
            Self::LiquidMagnetic => spin(0.0, 0.15, 0.0),
        }
    }

    /// Full program descriptor.
    pub fn descriptor(self) -> ShaderProgramDescriptor {
        let (source, file_path) = self.shader();
        ShaderProgramDescriptor::new(
            self.id(),
            self.display_name(),
            source,
            file_path,
            self.preset(),
            self.rotation(),
        )
    }
}

impl FromStr for BuiltinStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "fletes" {
            return Ok(Self::FleteSur);
        }
        Self::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| format!("unknown built-in style '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for style in BuiltinStyle::ALL {
            assert_eq!(style.id().parse::<BuiltinStyle>().unwrap(), style);
        }
        assert!("nonexistent_bank".parse::<BuiltinStyle>().is_err());
    }

    #[test]
    fn legacy_fletes_id_is_flete_sur() {
        assert_eq!("fletes".parse::<BuiltinStyle>(), Ok(BuiltinStyle::FleteSur));
        assert_eq!(BuiltinStyle::FleteSur.id(), "flete_sur");
        let parsed: BuiltinStyle = serde_json::from_str("\"fletes\"").unwrap();
        assert_eq!(parsed, BuiltinStyle::FleteSur);
    }

    #[test]
    fn serde_uses_registry_ids() {
        let json = serde_json::to_string(&BuiltinStyle::BovedaUsa).unwrap();
        assert_eq!(json, "\"boveda_usa\"");
    }

    #[test]
    fn every_descriptor_schema_validates() {
        for style in BuiltinStyle::ALL {
            let desc = style.descriptor();
            assert!(desc.schema.validate().is_ok(), "{}", desc.id);
            assert!(desc.source.contains("fn vs_main"));
            assert!(desc.source.contains("fn fs_main"));
        }
    }
}
