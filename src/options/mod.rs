//! Runtime options with TOML preset support.
//!
//! Animation, layout, post-processing, style, camera and keybinding settings
//! live here. Every section is `#[serde(default)]`, so a preset only needs
//! the keys it changes.

mod animation;
mod camera;
mod keybindings;
mod layout;
mod post_processing;
mod style;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use layout::LayoutOptions;
pub use post_processing::PostProcessingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use style::StyleOptions;

use crate::error::OrbisError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Breathing, selection, hover and pulse tunables.
    pub animation: AnimationOptions,
    /// Orb arrangement.
    pub layout: LayoutOptions,
    /// Post-processing effect parameters.
    pub post_processing: PostProcessingOptions,
    /// Program selection, value binding and agent orb.
    pub style: StyleOptions,
    /// Camera placement and projection.
    pub camera: CameraOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// JSON Schema of the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, OrbisError> {
        toml::from_str(content).map_err(|e| OrbisError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::Io`] when the file cannot be read and
    /// [`OrbisError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, OrbisError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::OptionsParse`] if serialization fails and
    /// [`OrbisError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrbisError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbisError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Preset names (TOML file stems) in `dir`, sorted.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            })
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AgentState;
    use crate::input::KeyAction;
    use crate::scene::layout::LayoutKind;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[post_processing]
bloom_intensity = 0.8

[style]
agent_state = "thinking"

[layout]
kind = "semicircle"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.post_processing.bloom_intensity, 0.8);
        assert_eq!(opts.post_processing.vignette_darkness, 0.6);
        assert_eq!(opts.style.agent_state, AgentState::Thinking);
        assert_eq!(opts.layout.kind, LayoutKind::Semicircle);
        assert_eq!(opts.layout.center.as_deref(), Some("profit"));
        assert_eq!(opts.animation.pulse_decay, 0.95);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[animation\nbase_scale = ").unwrap_err();
        assert!(matches!(err, OrbisError::OptionsParse(_)));
    }

    #[test]
    fn custom_keybindings_survive_load() {
        let toml_str = r#"
[keybindings.bindings]
toggle_bloom = "KeyX"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyX"), Some(KeyAction::ToggleBloom));
        assert_eq!(opts.keybindings.lookup("KeyB"), None);
    }

    #[test]
    fn default_keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyL"), Some(KeyAction::CycleLayout));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir().join(format!("orbis-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.camera.fovy = 60.0;
        opts.save(&dir.join("wide.toml")).unwrap();
        Options::default().save(&dir.join("calm.toml")).unwrap();

        let loaded = Options::load(&dir.join("wide.toml")).unwrap();
        assert_eq!(loaded.camera.fovy, 60.0);
        assert_eq!(Options::list_presets(&dir), vec!["calm", "wide"]);
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(OrbisError::Io(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_exposes_ui_sections() {
        let schema = serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema["properties"].as_object().unwrap();
        for section in ["animation", "layout", "post_processing", "style", "camera"] {
            assert!(props.contains_key(section), "{section}");
        }
        assert!(!props.contains_key("keybindings"));
        let post = &props["post_processing"]["properties"];
        assert!(post.get("bloom_intensity").is_some());
        assert!(post.get("chromatic_offset").is_none());
    }
}
