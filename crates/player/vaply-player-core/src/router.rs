//! Route resolution: turn a (possibly partial or relative) address into a concrete route.

use serde::{Deserialize, Serialize};

use crate::address::{
    address_to_route, route_to_address, PositionRef, Route, NEXT_NODE, PREVIOUS_NODE,
};
use crate::error::{PlayerError, PlayerResult};
use crate::flow::NodeFlow;

/// Route whose node code is known. Only the resolver produces these.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoute {
    pub node_code: String,
    /// Left for the content layer to interpret; may still hold a relative marker when the flow
    /// had no neighbour in that direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl ResolvedRoute {
    pub fn new(node_code: impl Into<String>, position: Option<String>) -> Self {
        Self {
            node_code: node_code.into(),
            position,
        }
    }

    pub fn position_ref(&self) -> Option<PositionRef<'_>> {
        self.position.as_deref().map(PositionRef::classify)
    }

    pub fn to_address(&self) -> String {
        route_to_address(&Route::from(self.clone()))
    }
}

impl From<ResolvedRoute> for Route {
    fn from(r: ResolvedRoute) -> Self {
        Route::new(Some(r.node_code), r.position)
    }
}

/// Resolve an external address (or none, for the initial render) against a flow.
pub fn resolve_address(
    address: Option<&str>,
    flow: &(impl NodeFlow + ?Sized),
) -> PlayerResult<ResolvedRoute> {
    let route = address.map(address_to_route).unwrap_or_default();
    resolve_route(route, flow)
}

/// Resolve a decoded route.
///
/// 1. Missing node code falls back to the flow's first node, keeping the position.
/// 2. `NEXT_NODE` / `PREVIOUS_NODE` move to the neighbour and drop the (relative) position.
///    Without a neighbour the route is returned unchanged, marker included.
/// 3. Every other position passes through untouched.
pub fn resolve_route(
    route: Route,
    flow: &(impl NodeFlow + ?Sized),
) -> PlayerResult<ResolvedRoute> {
    let Route {
        node_code,
        position,
    } = route;

    let node_code = match node_code {
        Some(code) => code,
        None => flow.first().ok_or(PlayerError::EmptyFlow)?.to_string(),
    };

    let neighbour = match position.as_deref() {
        Some(NEXT_NODE) => flow.next(&node_code),
        Some(PREVIOUS_NODE) => flow.previous(&node_code),
        _ => None,
    };

    let resolved = match neighbour {
        Some(code) => ResolvedRoute::new(code, None),
        None => ResolvedRoute::new(node_code, position),
    };
    log::debug!(
        "resolved route {}@{}",
        resolved.node_code,
        resolved.position.as_deref().unwrap_or_default()
    );
    Ok(resolved)
}
