use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Keyboard bindings: action → physical key string.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `ToggleBloom` → `"KeyB"`).
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::CycleAgentState, "Space".into()),
            (KeyAction::PulseSelected, "KeyP".into()),
            (KeyAction::SelectNext, "Tab".into()),
            (KeyAction::ClearSelection, "Escape".into()),
            (KeyAction::CycleLayout, "KeyL".into()),
            (KeyAction::ToggleBloom, "KeyB".into()),
            (KeyAction::ToggleChromatic, "KeyC".into()),
            (KeyAction::ToggleVignette, "KeyV".into()),
            (KeyAction::Restart, "KeyR".into()),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Action bound to `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == key)
            .map(|(action, _)| *action)
    }
}
