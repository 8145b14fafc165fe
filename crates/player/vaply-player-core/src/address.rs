//! Address <-> route conversion.
//!
//! Grammar:
//!   [<nodeCode>]["@"<position>]
//! - Only the first '@' is structural; anything after it belongs to `position`.
//! - Without a divider the whole address is the `position` and the node code is unset.
//!
//! `position` is either a decimal time ("12"), one of the reserved symbols below, or an
//! annotated position ("#annot-1") pointing at the start of that annotation's trigger.
//!   "node-1@5"          -> node="node-1", position="5"
//!   "node-2@NODE_END"   -> node="node-2", position="NODE_END"
//!   "#annot-3"          -> node=None,     position="#annot-3"

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_DIVIDER: char = '@';
pub const ANNOTATED_POSITION_MARKER: char = '#';

/// Start of the targeted node.
pub const NODE_START: &str = "NODE_START";
/// End of the targeted node.
pub const NODE_END: &str = "NODE_END";
/// Node following the targeted node in the flow.
pub const NEXT_NODE: &str = "NEXT_NODE";
/// Node preceding the targeted node in the flow.
pub const PREVIOUS_NODE: &str = "PREVIOUS_NODE";

/// Structured counterpart of an address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Route {
    pub fn new(node_code: Option<String>, position: Option<String>) -> Self {
        Self {
            node_code,
            position,
        }
    }

    /// Route to a node with no position.
    pub fn node(code: impl Into<String>) -> Self {
        Self::new(Some(code.into()), None)
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn position_ref(&self) -> Option<PositionRef<'_>> {
        self.position.as_deref().map(PositionRef::classify)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&route_to_address(self))
    }
}

impl FromStr for Route {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(address_to_route(s))
    }
}

/// Decode an address into a route. Total over all strings.
pub fn address_to_route(address: &str) -> Route {
    match address.split_once(ADDRESS_DIVIDER) {
        Some((node, position)) => Route::new(Some(node.to_string()), Some(position.to_string())),
        None => Route::new(None, Some(address.to_string())),
    }
}

/// Encode a route as an address; unset parts become empty strings.
pub fn route_to_address(route: &Route) -> String {
    let node = route.node_code.as_deref().unwrap_or_default();
    let position = route.position.as_deref().unwrap_or_default();
    let mut out = String::with_capacity(node.len() + position.len() + 1);
    out.push_str(node);
    out.push(ADDRESS_DIVIDER);
    out.push_str(position);
    out
}

pub fn is_annotated_position(position: Option<&str>) -> bool {
    position.is_some_and(|p| p.starts_with(ANNOTATED_POSITION_MARKER))
}

/// Annotation code referenced by an annotated position (marker stripped).
/// Positions without the marker are returned as-is; check [`is_annotated_position`] first.
pub fn annotated_position(position: Option<&str>) -> Option<&str> {
    position.map(|p| p.strip_prefix(ANNOTATED_POSITION_MARKER).unwrap_or(p))
}

/// Classified view of a route position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PositionRef<'a> {
    NodeStart,
    NodeEnd,
    NextNode,
    PreviousNode,
    /// Code of the annotation whose trigger start is the target.
    Annotated(&'a str),
    /// Anything else; expected to be a decimal time.
    Time(&'a str),
}

impl<'a> PositionRef<'a> {
    pub fn classify(position: &'a str) -> Self {
        match position {
            NODE_START => Self::NodeStart,
            NODE_END => Self::NodeEnd,
            NEXT_NODE => Self::NextNode,
            PREVIOUS_NODE => Self::PreviousNode,
            p => match p.strip_prefix(ANNOTATED_POSITION_MARKER) {
                Some(code) => Self::Annotated(code),
                None => Self::Time(p),
            },
        }
    }

    /// Relative positions only make sense against the flow, never inside a node.
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::NextNode | Self::PreviousNode)
    }
}
