use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
/// Bloom, chromatic aberration and vignette parameters.
pub struct PostProcessingOptions {
    /// Run the bloom pass with these parameters.
    #[schemars(title = "Bloom")]
    pub bloom_enabled: bool,
    /// Strength of the added glow.
    #[schemars(title = "Bloom Intensity", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub bloom_intensity: f32,
    /// Luminance where glow starts.
    #[schemars(title = "Bloom Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub bloom_threshold: f32,
    /// Width of the threshold knee.
    #[schemars(title = "Bloom Smoothing", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub bloom_smoothing: f32,
    /// Blur taps per direction.
    #[schemars(skip)]
    pub bloom_radius: f32,
    /// Run the chromatic aberration pass.
    #[schemars(title = "Chromatic Aberration")]
    pub chromatic_enabled: bool,
    /// UV offset of the red/blue channels.
    #[schemars(skip)]
    pub chromatic_offset: [f32; 2],
    /// Darken the edges.
    #[schemars(title = "Vignette")]
    pub vignette_enabled: bool,
    /// Vignette falloff start.
    #[schemars(title = "Vignette Offset", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub vignette_offset: f32,
    /// Vignette strength.
    #[schemars(title = "Vignette Darkness", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub vignette_darkness: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            bloom_enabled: true,
            bloom_intensity: 1.5,
            bloom_threshold: 0.2,
            bloom_smoothing: 0.9,
            bloom_radius: 4.0,
            chromatic_enabled: true,
            chromatic_offset: [0.0005, 0.0005],
            vignette_enabled: true,
            vignette_offset: 0.3,
            vignette_darkness: 0.6,
        }
    }
}
