//! Ping-pong targets and the fixed screen-pass sequence.

use super::chain::{PostChain, PostPass};
use super::screen_pass::{ScreenPass, ScreenShader};
use crate::error::OrbisError;
use crate::gpu::pipeline_helpers::render_target;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::renderer::pipeline_util::SCENE_COLOR_FORMAT;

const BLOOM: ScreenShader = ScreenShader {
    label: "Bloom",
    source: include_str!("../../../assets/shaders/screen/bloom.wgsl"),
    file_path: "screen/bloom.wgsl",
};
const CHROMATIC: ScreenShader = ScreenShader {
    label: "Chromatic Aberration",
    source: include_str!("../../../assets/shaders/screen/chromatic.wgsl"),
    file_path: "screen/chromatic.wgsl",
};
const VIGNETTE: ScreenShader = ScreenShader {
    label: "Vignette",
    source: include_str!("../../../assets/shaders/screen/vignette.wgsl"),
    file_path: "screen/vignette.wgsl",
};

/// Owns the post-processing pipeline: the HDR scene color target, two
/// ping-pong intermediates and the bloom → chromatic aberration → vignette
/// passes. The vignette always writes the final target.
pub struct PostProcessStack {
    scene_view: wgpu::TextureView,
    ping_view: wgpu::TextureView,
    pong_view: wgpu::TextureView,
    bloom: ScreenPass,
    chromatic: ScreenPass,
    vignette: ScreenPass,
    size: (u32, u32),
}

impl PostProcessStack {
    /// Build targets and passes for the context's output size and format.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] if a screen shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        chain: &PostChain,
    ) -> Result<Self, OrbisError> {
        let size = context.size();
        let [scene_view, ping_view, pong_view] = create_targets(&context.device, size);

        let bloom = ScreenPass::new(
            context,
            shader_composer,
            &BLOOM,
            SCENE_COLOR_FORMAT,
            &scene_view,
            &chain.bloom_params(size),
        )?;
        let chromatic = ScreenPass::new(
            context,
            shader_composer,
            &CHROMATIC,
            SCENE_COLOR_FORMAT,
            &ping_view,
            &chain.chromatic_params(),
        )?;
        let vignette = ScreenPass::new(
            context,
            shader_composer,
            &VIGNETTE,
            context.format(),
            &pong_view,
            &chain.vignette_params(),
        )?;

        Ok(Self {
            scene_view,
            ping_view,
            pong_view,
            bloom,
            chromatic,
            vignette,
            size,
        })
    }

    /// Recreate the intermediates for the context's new size and rebind
    /// every pass.
    pub fn resize(&mut self, context: &RenderContext) {
        let size = context.size();
        if size == self.size {
            return;
        }
        let [scene_view, ping_view, pong_view] = create_targets(&context.device, size);
        self.scene_view = scene_view;
        self.ping_view = ping_view;
        self.pong_view = pong_view;
        self.bloom.rebind_input(&context.device, &self.scene_view);
        self.chromatic.rebind_input(&context.device, &self.ping_view);
        self.vignette.rebind_input(&context.device, &self.pong_view);
        self.size = size;
    }

    /// Push the chain's current (possibly neutral) parameters.
    pub fn apply_chain(&self, queue: &wgpu::Queue, chain: &PostChain) {
        self.bloom.write_params(queue, &chain.bloom_params(self.size));
        self.chromatic.write_params(queue, &chain.chromatic_params());
        self.vignette.write_params(queue, &chain.vignette_params());
    }

    /// Run every pass in chain order, each reading the previous pass's
    /// complete output; the last writes `final_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        chain: &PostChain,
        final_view: &wgpu::TextureView,
    ) {
        for pass in chain.passes() {
            match pass {
                PostPass::Bloom => self.bloom.render(encoder, &self.ping_view),
                PostPass::ChromaticAberration => {
                    self.chromatic.render(encoder, &self.pong_view);
                }
                PostPass::Vignette => self.vignette.render(encoder, final_view),
            }
        }
    }

    /// HDR target the orb pass renders into.
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.scene_view
    }
}

fn create_targets(device: &wgpu::Device, size: (u32, u32)) -> [wgpu::TextureView; 3] {
    ["Scene Color", "Post Ping", "Post Pong"]
        .map(|label| render_target(device, label, SCENE_COLOR_FORMAT, size).1)
}
