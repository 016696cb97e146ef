use serde::{Deserialize, Serialize};

use crate::engine::command::OrbCommand;

/// Discrete actions that can be bound to keys.
///
/// Serde serializes as `snake_case` so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// cycle_agent_state = "Space"
/// toggle_bloom = "KeyB"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Advance the agent orb state.
    CycleAgentState,
    /// Pulse the selected orb.
    PulseSelected,
    /// Select the next orb.
    SelectNext,
    /// Drop the selection.
    ClearSelection,
    /// Next layout family.
    CycleLayout,
    /// Toggle bloom.
    ToggleBloom,
    /// Toggle chromatic aberration.
    ToggleChromatic,
    /// Toggle vignette.
    ToggleVignette,
    /// Restart the scene clock.
    Restart,
}

impl KeyAction {
    /// The command this action issues.
    pub fn to_command(self) -> OrbCommand {
        match self {
            Self::CycleAgentState => OrbCommand::CycleAgentState,
            Self::PulseSelected => OrbCommand::PulseSelected,
            Self::SelectNext => OrbCommand::SelectNext,
            Self::ClearSelection => OrbCommand::ClearSelection,
            Self::CycleLayout => OrbCommand::CycleLayout,
            Self::ToggleBloom => OrbCommand::ToggleBloom,
            Self::ToggleChromatic => OrbCommand::ToggleChromatic,
            Self::ToggleVignette => OrbCommand::ToggleVignette,
            Self::Restart => OrbCommand::Restart,
        }
    }
}
