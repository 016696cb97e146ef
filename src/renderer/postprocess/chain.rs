//! Fixed post-processing order and per-pass parameters.
//!
//! The chain is always bloom → chromatic aberration → vignette. Each pass
//! reads only the previous pass's complete output. A disabled pass still
//! runs, with neutral parameters, so the vignette is always the pass that
//! writes the final target.

use bytemuck::{Pod, Zeroable};

use crate::options::PostProcessingOptions;

/// One screen-space pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostPass {
    /// Threshold + blur + add.
    Bloom,
    /// Red/blue channel offset.
    ChromaticAberration,
    /// Edge darkening.
    Vignette,
}

impl PostPass {
    /// Execution order.
    pub const ORDER: [Self; 3] = [Self::Bloom, Self::ChromaticAberration, Self::Vignette];

    /// Label for GPU debug markers and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bloom => "Bloom",
            Self::ChromaticAberration => "Chromatic Aberration",
            Self::Vignette => "Vignette",
        }
    }
}

/// WGSL `BloomParams`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BloomParams {
    /// Glow strength; 0 disables.
    pub intensity: f32,
    /// Luminance where glow starts.
    pub threshold: f32,
    /// Threshold knee width.
    pub smoothing: f32,
    /// Blur taps per direction.
    pub radius: f32,
    /// `1 / resolution`.
    pub texel_size: [f32; 2],
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

/// WGSL `ChromaticParams`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ChromaticParams {
    /// UV offset of the red (+) and blue (−) samples.
    pub offset: [f32; 2],
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

/// WGSL `VignetteParams`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VignetteParams {
    /// Falloff start.
    pub offset: f32,
    /// Strength.
    pub darkness: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

/// Post-processing configuration owned by the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PostChain {
    bloom: BloomParams,
    chromatic: ChromaticParams,
    vignette: VignetteParams,
    bloom_enabled: bool,
    chromatic_enabled: bool,
    vignette_enabled: bool,
}

impl Default for PostChain {
    fn default() -> Self {
        Self::from_options(&PostProcessingOptions::default())
    }
}

impl PostChain {
    /// Chain configured from options.
    pub fn from_options(options: &PostProcessingOptions) -> Self {
        Self {
            bloom: BloomParams {
                intensity: options.bloom_intensity.max(0.0),
                threshold: options.bloom_threshold,
                smoothing: options.bloom_smoothing.max(0.0),
                radius: options.bloom_radius.clamp(1.0, 8.0),
                texel_size: [0.0; 2],
                _pad: [0.0; 2],
            },
            chromatic: ChromaticParams {
                offset: options.chromatic_offset,
                _pad: [0.0; 2],
            },
            vignette: VignetteParams {
                offset: options.vignette_offset,
                darkness: options.vignette_darkness,
                _pad: [0.0; 2],
            },
            bloom_enabled: options.bloom_enabled,
            chromatic_enabled: options.chromatic_enabled,
            vignette_enabled: options.vignette_enabled,
        }
    }

    /// Passes in execution order. Always all three.
    pub fn passes(&self) -> [PostPass; 3] {
        PostPass::ORDER
    }

    /// Whether `pass` applies its configured effect.
    pub fn is_enabled(&self, pass: PostPass) -> bool {
        match pass {
            PostPass::Bloom => self.bloom_enabled,
            PostPass::ChromaticAberration => self.chromatic_enabled,
            PostPass::Vignette => self.vignette_enabled,
        }
    }

    /// Enable or disable `pass`.
    pub fn set_enabled(&mut self, pass: PostPass, enabled: bool) {
        match pass {
            PostPass::Bloom => self.bloom_enabled = enabled,
            PostPass::ChromaticAberration => self.chromatic_enabled = enabled,
            PostPass::Vignette => self.vignette_enabled = enabled,
        }
        log::debug!(
            "{} {}",
            pass.label(),
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Flip `pass` and return its new state.
    pub fn toggle(&mut self, pass: PostPass) -> bool {
        let enabled = !self.is_enabled(pass);
        self.set_enabled(pass, enabled);
        enabled
    }

    /// Bloom parameters to upload for a `size` target (neutral when
    /// disabled).
    pub fn bloom_params(&self, size: (u32, u32)) -> BloomParams {
        let mut params = self.bloom;
        params.texel_size = [
            1.0 / size.0.max(1) as f32,
            1.0 / size.1.max(1) as f32,
        ];
        if !self.bloom_enabled {
            params.intensity = 0.0;
        }
        params
    }

    /// Chromatic parameters to upload (zero offset when disabled).
    pub fn chromatic_params(&self) -> ChromaticParams {
        if self.chromatic_enabled {
            self.chromatic
        } else {
            ChromaticParams::zeroed()
        }
    }

    /// Vignette parameters to upload (no darkening when disabled).
    pub fn vignette_params(&self) -> VignetteParams {
        if self.vignette_enabled {
            self.vignette
        } else {
            VignetteParams::zeroed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_fixed() {
        let chain = PostChain::default();
        assert_eq!(
            chain.passes(),
            [PostPass::Bloom, PostPass::ChromaticAberration, PostPass::Vignette]
        );
    }

    #[test]
    fn disabling_keeps_all_passes_with_neutral_params() {
        let mut chain = PostChain::default();
        assert!(!chain.toggle(PostPass::Bloom));
        assert!(!chain.toggle(PostPass::ChromaticAberration));
        assert!(!chain.toggle(PostPass::Vignette));
        assert_eq!(chain.passes().len(), 3);
        assert_eq!(chain.bloom_params((100, 100)).intensity, 0.0);
        assert_eq!(chain.chromatic_params().offset, [0.0, 0.0]);
        assert_eq!(chain.vignette_params().darkness, 0.0);
        assert!(chain.toggle(PostPass::Bloom));
        assert_eq!(chain.bloom_params((100, 100)).intensity, 1.5);
    }

    #[test]
    fn params_match_wgsl_sizes() {
        assert_eq!(size_of::<BloomParams>(), 32);
        assert_eq!(size_of::<ChromaticParams>(), 16);
        assert_eq!(size_of::<VignetteParams>(), 16);
    }

    #[test]
    fn texel_size_tracks_target() {
        let chain = PostChain::default();
        assert_eq!(chain.bloom_params((200, 100)).texel_size, [0.005, 0.01]);
        assert_eq!(chain.bloom_params((0, 0)).texel_size, [1.0, 1.0]);
    }
}
