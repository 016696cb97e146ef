use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::agent::DEFAULT_LERP_RATE;
use crate::animation::AgentState;
use crate::shader::BuiltinStyle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Style", inline)]
#[serde(default)]
/// Program selection, value binding and agent orb behavior.
pub struct StyleOptions {
    /// Program used for unknown style ids.
    #[schemars(skip)]
    pub default_style: String,
    /// Balance that maps to a full capital ratio.
    #[schemars(title = "Max Balance", range(min = 1.0))]
    pub max_balance: f64,
    /// Ambient light level.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Agent state at startup.
    #[schemars(title = "Agent State")]
    pub agent_state: AgentState,
    /// Agent color/intensity convergence rate (per second).
    #[schemars(title = "Agent Transition", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub agent_lerp_rate: f32,
    /// Retry budget for the remote agent avatar.
    #[schemars(skip)]
    pub asset_max_attempts: u32,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            default_style: BuiltinStyle::DEFAULT.id().to_owned(),
            max_balance: 1_000_000.0,
            ambient: 0.2,
            agent_state: AgentState::Idle,
            agent_lerp_rate: DEFAULT_LERP_RATE,
            asset_max_attempts: 3,
        }
    }
}
