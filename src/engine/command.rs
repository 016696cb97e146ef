//! Everything a user (or host) can ask the orb scene to do.
//!
//! Key presses, pointer gestures and programmatic calls all become an
//! [`OrbCommand`] passed to [`Scene::execute`](crate::scene::Scene::execute)
//! or [`OrbEngine::execute`](super::OrbEngine::execute).

use glam::Vec2;

use crate::animation::AgentState;
use crate::scene::OrbId;

/// One scene operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OrbCommand {
    /// Pointer moved; position in NDC.
    PointerMoved {
        /// Pointer in `[-1, 1]²`, y up.
        ndc: Vec2,
    },
    /// Pointer left the viewport; nothing is hovered until it returns.
    PointerLeft,
    /// Audio level for the `audio_level` uniform, `[0, 1]`.
    SetAudioLevel(f32),
    /// Primary click; selects and pulses the orb under `ndc`, or clears
    /// the selection on background.
    Click {
        /// Pointer in `[-1, 1]²`, y up.
        ndc: Vec2,
    },
    /// Select a specific orb.
    Select(OrbId),
    /// Select the next orb in scene order.
    SelectNext,
    /// Drop the selection.
    ClearSelection,
    /// Fire a pulse on the selected orb.
    PulseSelected,
    /// Fire a pulse on a specific orb.
    Pulse(OrbId),
    /// Retarget the agent orb.
    SetAgentState(AgentState),
    /// Advance the agent orb to its next state.
    CycleAgentState,
    /// Switch to the next layout family.
    CycleLayout,
    /// Toggle the bloom pass.
    ToggleBloom,
    /// Toggle the chromatic aberration pass.
    ToggleChromatic,
    /// Toggle the vignette pass.
    ToggleVignette,
    /// Reset the frame clock and all transient orb state.
    Restart,
}
