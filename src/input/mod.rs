//! Input handling: platform-agnostic events, pointer conversion, CPU
//! picking and the processor that turns events into scene commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
pub mod picking;
/// Pixel to NDC conversion.
pub mod pointer;
/// Converts raw events into scene commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
