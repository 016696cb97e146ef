//! A single full-screen effect: one input texture, one sampler, one
//! parameter block, one output.

use bytemuck::Pod;

use crate::error::OrbisError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler, texture_2d,
    uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;

/// WGSL source of a screen-space effect.
pub struct ScreenShader {
    /// Debug label.
    pub label: &'static str,
    /// WGSL text using `@group(0)` bindings 0 (texture), 1 (sampler) and
    /// 2 (params).
    pub source: &'static str,
    /// Path used in composer diagnostics.
    pub file_path: &'static str,
}

/// Full-screen pass reading one texture and writing one target.
pub struct ScreenPass {
    label: &'static str,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    params_buffer: wgpu::Buffer,
}

impl ScreenPass {
    /// Build the pass for `P`-typed parameters, reading `input` and
    /// writing `output_format` targets.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] if the shader fails to compose.
    pub fn new<P: Pod>(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        shader: &ScreenShader,
        output_format: wgpu::TextureFormat,
        input: &wgpu::TextureView,
        initial: &P,
    ) -> Result<Self, OrbisError> {
        let device = &context.device;
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{} Bind Group Layout", shader.label)),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2, wgpu::ShaderStages::FRAGMENT),
                ],
            });
        let sampler = linear_sampler(device, &format!("{} Sampler", shader.label));
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Params", shader.label)),
            size: size_of::<P>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        context
            .queue
            .write_buffer(&params_buffer, 0, bytemuck::bytes_of(initial));

        let module =
            shader_composer.compose(device, shader.label, shader.source, shader.file_path)?;
        let pipeline = create_screen_space_pipeline(
            device,
            shader.label,
            &module,
            output_format,
            &[&bind_group_layout],
        );
        let bind_group = create_bind_group(
            device,
            shader.label,
            &bind_group_layout,
            input,
            &sampler,
            &params_buffer,
        );

        Ok(Self {
            label: shader.label,
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            params_buffer,
        })
    }

    /// Point the pass at a new input texture (after a resize).
    pub fn rebind_input(&mut self, device: &wgpu::Device, input: &wgpu::TextureView) {
        self.bind_group = create_bind_group(
            device,
            self.label,
            &self.bind_group_layout,
            input,
            &self.sampler,
            &self.params_buffer,
        );
    }

    /// Upload new parameters.
    pub fn write_params<P: Pod>(&self, queue: &wgpu::Queue, params: &P) {
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(params));
    }

    /// Draw the full-screen triangle into `output`, replacing its contents.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, output: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    input: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    params: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(input),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: params.as_entire_binding(),
            },
        ],
    })
}
