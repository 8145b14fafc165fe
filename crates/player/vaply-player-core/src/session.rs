//! Per-node session state.

use serde::{Deserialize, Serialize};

use crate::annotation::{AnnotationSnapshot, ClosedAnnotations};
use crate::model::NodeConfig;

/// State that lives exactly as long as the player stays on one node.
///
/// A new session is created whenever the resolved node code changes, which is what resets the
/// closed annotations and the content clock. Re-resolving to the same node keeps the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSession {
    node_code: String,
    current_time: f64,
    closed: ClosedAnnotations,
}

impl NodeSession {
    pub fn new(node_code: impl Into<String>) -> Self {
        Self {
            node_code: node_code.into(),
            current_time: 0.0,
            closed: ClosedAnnotations::new(),
        }
    }

    pub fn node_code(&self) -> &str {
        &self.node_code
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Latest time reported by the content. Earlier values are accepted as-is (backward seeks).
    pub fn set_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Current time in the textual form the trigger engine evaluates.
    pub fn time_position(&self) -> String {
        self.current_time.to_string()
    }

    pub fn close(&mut self, code: &str) -> bool {
        self.closed.close(code)
    }

    pub fn closed(&self) -> &ClosedAnnotations {
        &self.closed
    }

    /// Annotation sets for this session's node at the current time.
    pub fn evaluate(&self, node: &NodeConfig) -> AnnotationSnapshot {
        AnnotationSnapshot::evaluate(
            &self.time_position(),
            &node.annotations,
            &node.triggers,
            &self.closed,
        )
    }
}
