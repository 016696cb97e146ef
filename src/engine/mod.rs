//! Couples the [`Scene`] with the GPU renderer and implements the host
//! per-frame callback.
//!
//! Every frame runs the same two steps: update all orbs, then draw. Surface
//! loss and timeouts are absorbed here so the frame path never panics.

pub mod command;

use std::sync::Arc;

pub use command::OrbCommand;

use crate::error::OrbisError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::postprocess::PostProcessStack;
use crate::renderer::OrbRenderer;
use crate::scene::{LabelAnchor, Scene};
use crate::shader::{BuiltinStyle, RegistryBuilder, ShaderRegistry};

/// Built-in registry whose fallback program is `options.style.default_style`.
/// An unknown style keeps the catalog default.
fn builtin_registry(
    options: &Options,
    validate_shaders: bool,
) -> Result<ShaderRegistry, OrbisError> {
    let mut builder = RegistryBuilder::with_builtins().validate_shaders(validate_shaders);
    match options.style.default_style.parse::<BuiltinStyle>() {
        Ok(style) => builder = builder.default_id(style.id()),
        Err(_) => log::warn!(
            "unknown default style '{}', keeping '{}'",
            options.style.default_style,
            BuiltinStyle::DEFAULT.id()
        ),
    }
    builder.build()
}

/// Scene + renderer + input mapping for one output surface.
pub struct OrbEngine {
    context: RenderContext,
    scene: Scene,
    orb_renderer: OrbRenderer,
    post_process: PostProcessStack,
    input: InputProcessor,
}

impl OrbEngine {
    /// Engine for a window: GPU context, validated built-in registry and
    /// the bank scene configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::Gpu`] when no device can be created, and
    /// registry or shader errors from [`OrbEngine::new`].
    pub async fn for_window(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, OrbisError> {
        let context = RenderContext::new(window, size).await?;
        let registry = Arc::new(builtin_registry(options, true)?);
        let scene = Scene::bank_scene(registry, options);
        Self::new(context, scene, options)
    }

    /// Engine drawing `scene` through `context`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::ShaderCompose`] if an orb or screen shader
    /// fails to compose.
    pub fn new(
        context: RenderContext,
        mut scene: Scene,
        options: &Options,
    ) -> Result<Self, OrbisError> {
        let mut composer = ShaderComposer::new()?;
        let orb_renderer = OrbRenderer::new(&context, &mut composer, scene.registry())?;
        let post_process = PostProcessStack::new(&context, &mut composer, scene.post_chain())?;
        scene.set_aspect(context.aspect());
        let input = InputProcessor::new(context.size(), options.keybindings.clone());
        log::info!(
            "orb engine started: {} orbs, {} programs, {:?} layout",
            scene.len(),
            scene.registry().len(),
            scene.layout()
        );
        Ok(Self {
            context,
            scene,
            orb_renderer,
            post_process,
            input,
        })
    }

    /// Engine over the built-in registry (default style from `options`)
    /// without shader validation, e.g. for hosts that validated at build
    /// time.
    ///
    /// # Errors
    ///
    /// Same as [`OrbEngine::new`].
    pub fn with_builtin_scene(context: RenderContext, options: &Options) -> Result<Self, OrbisError> {
        let registry = Arc::new(builtin_registry(options, false)?);
        let scene = Scene::bank_scene(registry, options);
        Self::new(context, scene, options)
    }

    // -- Per frame --

    /// Host per-frame callback: update every orb at `elapsed`, then draw.
    pub fn frame(&mut self, elapsed: f32, delta: f32) {
        let input = self.scene.frame_input(elapsed, delta);
        self.scene.update(&input);
        self.present();
    }

    /// Self-timed frame from the scene's wall clock.
    pub fn tick(&mut self) {
        self.scene.tick();
        self.present();
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("surface timeout, skipping frame");
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }

    /// Draw the current scene state to the surface.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] from acquiring the next frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render_to(&view);
        frame.present();
        Ok(())
    }

    /// Draw the current scene state into a host-owned view (same format
    /// and size as the context).
    pub fn render_to(&mut self, view: &wgpu::TextureView) {
        self.orb_renderer.prepare(&self.context, &self.scene);
        self.post_process
            .apply_chain(&self.context.queue, self.scene.post_chain());

        let mut encoder = self.context.create_encoder();
        self.orb_renderer
            .render(&mut encoder, self.post_process.scene_view());
        self.post_process
            .render(&mut encoder, self.scene.post_chain(), view);
        self.context.submit(encoder);
    }

    // -- Surface --

    /// Track a new output size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.scene.set_aspect(self.context.aspect());
        self.orb_renderer.resize(&self.context);
        self.post_process.resize(&self.context);
        self.input.resize(width, height);
    }

    // -- Input --

    /// Apply one command.
    pub fn execute(&mut self, command: OrbCommand) {
        self.scene.execute(command);
    }

    /// Map a platform event to a command and apply it. Returns whether a
    /// command was produced.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let Some(command) = self.input.handle_event(event) else {
            return false;
        };
        self.scene.execute(command);
        true
    }

    /// Apply the command bound to `key`, if any.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        let Some(command) = self.input.handle_key_press(key) else {
            return false;
        };
        self.scene.execute(command);
        true
    }

    // -- Accessors --

    /// Scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// GPU context.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Label anchors for the current output size.
    pub fn label_anchors(&self) -> Vec<LabelAnchor<'_>> {
        self.scene.label_anchors(self.context.size())
    }

    /// Orbs drawn in the last frame.
    pub fn draw_count(&self) -> usize {
        self.orb_renderer.draw_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_honors_default_style_option() {
        let mut options = Options::default();
        options.style.default_style = "profit".to_owned();
        let registry = builtin_registry(&options, false).unwrap();
        assert_eq!(registry.default_id(), "profit");
        assert_eq!(registry.get("nonexistent_bank").id, "profit");
    }

    #[test]
    fn unknown_default_style_keeps_catalog_default() {
        let mut options = Options::default();
        options.style.default_style = "nonexistent_bank".to_owned();
        let registry = builtin_registry(&options, false).unwrap();
        assert_eq!(registry.default_id(), BuiltinStyle::DEFAULT.id());
    }

    #[test]
    fn legacy_default_style_resolves() {
        let mut options = Options::default();
        options.style.default_style = "fletes".to_owned();
        let registry = builtin_registry(&options, false).unwrap();
        assert_eq!(registry.default_id(), "flete_sur");
    }
}
