//! Orb geometry pass: one pipeline per shader program, one uniform buffer
//! per orb, all orbs drawn with the shared UV-sphere mesh into the HDR
//! scene color target.

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use super::pipeline_util::{depth_stencil_state, hdr_fragment_targets, DEPTH_FORMAT};
use super::sphere_mesh::{uv_sphere, OrbVertex, SPHERE_RINGS, SPHERE_SEGMENTS};
use crate::camera::SceneUniform;
use crate::error::OrbisError;
use crate::gpu::pipeline_helpers::{render_target, uniform_buffer};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::{OrbId, Scene};
use crate::shader::{ShaderProgramDescriptor, ShaderRegistry, UniformBlock};
use crate::util::color::DEEP_VOID;

/// GPU resources of one orb.
struct OrbSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every procedurally rendered orb of a [`Scene`].
pub struct OrbRenderer {
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    orb_layout: wgpu::BindGroupLayout,
    pipelines: FxHashMap<String, wgpu::RenderPipeline>,
    slots: FxHashMap<OrbId, OrbSlot>,
    /// `(orb, program id)` in draw order, rebuilt by `prepare`.
    draw_list: Vec<(OrbId, String)>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth_view: wgpu::TextureView,
}

impl OrbRenderer {
    /// Compile a pipeline for every program in `registry` and upload the
    /// sphere mesh.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] if a program fails to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        registry: &ShaderRegistry,
    ) -> Result<Self, OrbisError> {
        let device = &context.device;
        let scene_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Orb Scene Bind Group Layout"),
                entries: &[uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            });
        let orb_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Orb Uniforms Bind Group Layout"),
                entries: &[uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            });

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Orb Scene Uniform Buffer"),
            size: size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Orb Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Orb Pipeline Layout"),
                bind_group_layouts: &[&scene_layout, &orb_layout],
                push_constant_ranges: &[],
            });
        let mut pipelines = FxHashMap::default();
        for program in registry.programs() {
            let pipeline =
                create_orb_pipeline(context, shader_composer, &pipeline_layout, program)?;
            let _ = pipelines.insert(program.id.clone(), pipeline);
        }

        let mesh = uv_sphere(SPHERE_SEGMENTS, SPHERE_RINGS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orb Sphere Vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orb Sphere Indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let (_, depth_view) =
            render_target(device, "Orb Depth Texture", DEPTH_FORMAT, context.size());

        log::debug!(
            "orb renderer ready: {} pipelines, {} sphere triangles",
            pipelines.len(),
            mesh.indices.len() / 3
        );

        Ok(Self {
            scene_buffer,
            scene_bind_group,
            orb_layout,
            pipelines,
            slots: FxHashMap::default(),
            draw_list: Vec::new(),
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            depth_view,
        })
    }

    /// Upload the scene uniform and every drawn orb's block, creating and
    /// dropping per-orb buffers as orbs come and go.
    pub fn prepare(&mut self, context: &RenderContext, scene: &Scene) {
        context.queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&scene.scene_uniform()),
        );

        self.draw_list.clear();
        for orb in scene.orbs() {
            if !scene.draws_procedurally(orb.id()) {
                continue;
            }
            let slot = self
                .slots
                .entry(orb.id())
                .or_insert_with(|| create_slot(&context.device, &self.orb_layout, orb.id()));
            context
                .queue
                .write_buffer(&slot.buffer, 0, bytemuck::bytes_of(orb.block()));
            self.draw_list.push((orb.id(), orb.program().id.clone()));
        }
        self.slots.retain(|id, _| scene.orb(*id).is_some());
    }

    /// Clear `target` and draw the prepared orbs into it.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let [r, g, b] = DEEP_VOID;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Orb Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(r),
                        g: f64::from(g),
                        b: f64::from(b),
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for (id, program) in &self.draw_list {
            let (Some(pipeline), Some(slot)) = (self.pipelines.get(program), self.slots.get(id))
            else {
                continue;
            };
            pass.set_pipeline(pipeline);
            pass.set_bind_group(1, &slot.bind_group, &[]);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        }
    }

    /// Recreate the depth buffer for the new output size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (_, depth_view) = render_target(
            &context.device,
            "Orb Depth Texture",
            DEPTH_FORMAT,
            context.size(),
        );
        self.depth_view = depth_view;
    }

    /// Orbs drawn by the last `render`.
    pub fn draw_count(&self) -> usize {
        self.draw_list.len()
    }
}

fn create_orb_pipeline(
    context: &RenderContext,
    shader_composer: &mut ShaderComposer,
    layout: &wgpu::PipelineLayout,
    program: &ShaderProgramDescriptor,
) -> Result<wgpu::RenderPipeline, OrbisError> {
    let label = format!("Orb {}", program.name);
    let shader =
        shader_composer.compose(&context.device, &label, &program.source, &program.file_path)?;
    Ok(context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[OrbVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &hdr_fragment_targets(),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        }))
}

fn create_slot(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, id: OrbId) -> OrbSlot {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{id} Uniforms")),
        size: size_of::<UniformBlock>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{id} Bind Group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    OrbSlot { buffer, bind_group }
}
