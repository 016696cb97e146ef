//! Converts raw platform events into scene commands.

use super::event::{InputEvent, MouseButton};
use super::pointer::pixels_to_ndc;
use crate::engine::command::OrbCommand;
use crate::options::KeybindingOptions;

/// Turns window events into [`OrbCommand`]s.
///
/// Owns the cursor position, viewport size and key bindings.
///
/// ```ignore
/// if let Some(cmd) = processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = processor.handle_key_press("KeyB") {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    cursor: (f32, f32),
    viewport: (u32, u32),
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Processor for a viewport of `viewport` pixels.
    pub fn new(viewport: (u32, u32), key_bindings: KeybindingOptions) -> Self {
        Self {
            cursor: (viewport.0 as f32 * 0.5, viewport.1 as f32 * 0.5),
            viewport,
            key_bindings,
        }
    }

    /// Track a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Last cursor position in pixels.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Command bound to a physical key string (winit `KeyCode` debug name,
    /// e.g. `"KeyB"`, `"Space"`).
    pub fn handle_key_press(&self, key: &str) -> Option<OrbCommand> {
        self.key_bindings.lookup(key).map(|action| action.to_command())
    }

    /// Process one event.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<OrbCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = (x, y);
                Some(OrbCommand::PointerMoved {
                    ndc: pixels_to_ndc(x, y, self.viewport),
                })
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => Some(OrbCommand::Click {
                ndc: pixels_to_ndc(self.cursor.0, self.cursor.1, self.viewport),
            }),
            InputEvent::MouseButton { .. } => None,
            InputEvent::CursorLeft => Some(OrbCommand::PointerLeft),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn cursor_becomes_ndc() {
        let mut p = InputProcessor::new((800, 600), KeybindingOptions::default());
        let cmd = p.handle_event(InputEvent::CursorMoved { x: 800.0, y: 0.0 });
        assert_eq!(cmd, Some(OrbCommand::PointerMoved { ndc: Vec2::new(1.0, 1.0) }));
    }

    #[test]
    fn left_press_clicks_at_cursor() {
        let mut p = InputProcessor::new((800, 600), KeybindingOptions::default());
        let _ = p.handle_event(InputEvent::CursorMoved { x: 0.0, y: 600.0 });
        let cmd = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(cmd, Some(OrbCommand::Click { ndc: Vec2::new(-1.0, -1.0) }));
        let release = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert_eq!(release, None);
    }

    #[test]
    fn cursor_leaving_is_not_a_position() {
        let mut p = InputProcessor::new((800, 600), KeybindingOptions::default());
        let _ = p.handle_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        assert_eq!(p.handle_event(InputEvent::CursorLeft), Some(OrbCommand::PointerLeft));
    }

    #[test]
    fn default_keys_map_to_commands() {
        let p = InputProcessor::new((800, 600), KeybindingOptions::default());
        assert_eq!(p.handle_key_press("KeyB"), Some(OrbCommand::ToggleBloom));
        assert_eq!(p.handle_key_press("Space"), Some(OrbCommand::CycleAgentState));
        assert_eq!(p.handle_key_press("F13"), None);
    }
}
