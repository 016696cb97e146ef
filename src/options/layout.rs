use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::layout::{LayoutKind, LayoutPolicy};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// How bank orbs are arranged.
pub struct LayoutOptions {
    /// Layout family.
    #[schemars(title = "Layout")]
    pub kind: LayoutKind,
    /// Label placed at the origin (hexagonal and circular layouts).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub center: Option<String>,
    /// Semicircle radius.
    #[schemars(title = "Arc Radius", range(min = 1.0, max = 10.0), extend("step" = 0.25))]
    pub semicircle_radius: f32,
    /// Circular ring radius.
    #[schemars(title = "Ring Radius", range(min = 1.0, max = 10.0), extend("step" = 0.25))]
    pub circle_radius: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Hexagonal,
            center: Some("profit".to_owned()),
            semicircle_radius: 4.0,
            circle_radius: 3.0,
        }
    }
}

impl LayoutOptions {
    /// Concrete policy for `kind` using these radii and center.
    pub fn policy(&self, kind: LayoutKind) -> LayoutPolicy {
        match kind {
            LayoutKind::Semicircle => LayoutPolicy::Semicircle {
                radius: self.semicircle_radius,
            },
            LayoutKind::Hexagonal => LayoutPolicy::Hexagonal {
                center: self.center.clone(),
            },
            LayoutKind::Circular => LayoutPolicy::Circular {
                center: self.center.clone(),
                radius: self.circle_radius,
            },
        }
    }
}
