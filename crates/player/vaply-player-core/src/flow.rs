//! Node flows: adjacency queries over the configured node order.
//!
//! Route resolution only talks to the [`NodeFlow`] capability; the `type` tag of
//! [`NodeFlowConfig`] picks the implementation. `list` is the only topology today.

use crate::model::{ListFlowConfig, NodeFlowConfig};

/// Adjacency queries a flow topology must answer.
pub trait NodeFlow {
    /// Entry node of the flow.
    fn first(&self) -> Option<&str>;
    /// Node following `node_code`, `None` when unknown or last.
    fn next(&self, node_code: &str) -> Option<&str>;
    /// Node preceding `node_code`, `None` when unknown or first.
    fn previous(&self, node_code: &str) -> Option<&str>;
}

impl NodeFlowConfig {
    /// Flow implementation selected by the config's `type` tag.
    pub fn as_flow(&self) -> &dyn NodeFlow {
        match self {
            NodeFlowConfig::List { list } => list,
        }
    }

    /// Node codes in flow order, for diagnostics.
    pub fn node_codes(&self) -> &[String] {
        match self {
            NodeFlowConfig::List { list } => &list.nodes,
        }
    }
}

/// List flow keeps nodes in a list and executes them sequentially.
impl NodeFlow for ListFlowConfig {
    fn first(&self) -> Option<&str> {
        list_first(&self.nodes)
    }

    fn next(&self, node_code: &str) -> Option<&str> {
        list_next(node_code, &self.nodes)
    }

    fn previous(&self, node_code: &str) -> Option<&str> {
        list_previous(node_code, &self.nodes)
    }
}

pub fn list_first(nodes: &[String]) -> Option<&str> {
    nodes.first().map(String::as_str)
}

/// Repeated codes: the first occurrence decides.
pub fn list_next<'a>(node_code: &str, nodes: &'a [String]) -> Option<&'a str> {
    let idx = nodes.iter().position(|n| n == node_code)?;
    nodes.get(idx + 1).map(String::as_str)
}

pub fn list_previous<'a>(node_code: &str, nodes: &'a [String]) -> Option<&'a str> {
    let idx = nodes.iter().position(|n| n == node_code)?;
    idx.checked_sub(1)
        .and_then(|i| nodes.get(i))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(codes: &[&str]) -> NodeFlowConfig {
        NodeFlowConfig::List {
            list: ListFlowConfig {
                nodes: codes.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    #[test]
    fn list_adjacency() {
        let cfg = list(&["a", "b", "c"]);
        let flow = cfg.as_flow();
        assert_eq!(flow.first(), Some("a"));
        assert_eq!(flow.next("a"), Some("b"));
        assert_eq!(flow.next("b"), Some("c"));
        assert_eq!(flow.next("c"), None);
        assert_eq!(flow.previous("a"), None);
        assert_eq!(flow.previous("c"), Some("b"));
    }

    #[test]
    fn unknown_node_has_no_neighbours() {
        let cfg = list(&["a", "b"]);
        assert_eq!(cfg.as_flow().next("zzz"), None);
        assert_eq!(cfg.as_flow().previous("zzz"), None);
    }

    #[test]
    fn empty_list_has_no_first() {
        let cfg = list(&[]);
        assert_eq!(cfg.as_flow().first(), None);
        assert!(cfg.node_codes().is_empty());
    }

    #[test]
    fn duplicates_use_first_occurrence() {
        let cfg = list(&["a", "b", "a", "c"]);
        let flow = cfg.as_flow();
        assert_eq!(flow.next("a"), Some("b"));
        assert_eq!(flow.previous("a"), None);
        assert_eq!(flow.previous("c"), Some("a"));
    }
}
