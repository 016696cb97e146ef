//! Standalone orb window backed by winit.
//!
//! ```no_run
//! # use orbis::Viewer;
//! Viewer::builder()
//!     .with_title("Chronos Orbs")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::OrbisError, options::Options, scene::BalanceSnapshot, InputEvent,
    MouseButton, OrbEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    snapshots: Vec<BalanceSnapshot>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            snapshots: Vec::new(),
            title: "Orbis".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Balance snapshots bound to the bank orbs at startup.
    #[must_use]
    pub fn with_snapshots(mut self, snapshots: Vec<BalanceSnapshot>) -> Self {
        self.snapshots = snapshots;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            snapshots: self.snapshots,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the bank orbs and the agent orb.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    snapshots: Vec<BalanceSnapshot>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), OrbisError> {
        let event_loop =
            EventLoop::new().map_err(|e| OrbisError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: self.options,
            snapshots: self.snapshots,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrbisError::Viewer(e.to_string()))
    }
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<OrbEngine>,
    options: Options,
    snapshots: Vec<BalanceSnapshot>,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let mut engine = match pollster::block_on(OrbEngine::for_window(
            Arc::clone(&window),
            size,
            &self.options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };
        engine
            .scene_mut()
            .apply_snapshots(std::mem::take(&mut self.snapshots));

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(event_size) => {
                let (w, h) = viewport_size(event_size);
                engine.resize(w, h);
            }

            WindowEvent::RedrawRequested => {
                engine.tick();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let _ = engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let _ = engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                let _ = engine.handle_input(InputEvent::CursorLeft);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let _ = engine.handle_key_press(&format!("{code:?}"));
            }

            _ => (),
        }
    }
}
