//! Player props and JSON entry points.

use serde::{Deserialize, Serialize};

use crate::error::PlayerResult;
use crate::model::NodePlayerConfig;

/// Constructor props of an embedded player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProps {
    /// Where to start; unset starts at the flow's first node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_address: Option<String>,
    pub config: NodePlayerConfig,
}

impl PlayerProps {
    pub fn new(config: NodePlayerConfig) -> Self {
        Self {
            current_address: None,
            config,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.current_address = Some(address.into());
        self
    }
}

/// Decode a player configuration. Unknown `type` discriminants are rejected here.
pub fn parse_player_config_json(s: &str) -> PlayerResult<NodePlayerConfig> {
    Ok(serde_json::from_str(s)?)
}

/// Decode full props (`{ currentAddress?, config }`).
pub fn parse_player_props_json(s: &str) -> PlayerResult<PlayerProps> {
    Ok(serde_json::from_str(s)?)
}
