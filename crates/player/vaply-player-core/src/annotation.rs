//! Annotation trigger evaluation.
//!
//! Three derived sets per node, recomputed by the caller whenever time, route or dismissals change:
//! - available: annotations whose trigger window contains the current position
//! - active: available minus the annotations closed while on this node
//! - blocking: whether any active annotation pauses the content
//!
//! All functions are pure; recomputing with the same inputs gives the same answer.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{
    AnnotationConfig, AnnotationTriggerConfig, TimeUpdateWindow, TriggerKind, TriggerPoint,
};
use crate::position::parse_time_position;

/// Annotations whose `kind` trigger is active at `position`, in trigger order.
///
/// Triggers pointing at a code missing from `annotations` are skipped. An annotation targeted by
/// several active triggers is listed once.
pub fn find_available_annotations<'a>(
    position: &str,
    kind: TriggerKind,
    annotations: &'a [AnnotationConfig],
    triggers: &[AnnotationTriggerConfig],
) -> Vec<&'a AnnotationConfig> {
    let mut out: Vec<&'a AnnotationConfig> = Vec::new();
    for trigger in triggers
        .iter()
        .filter(|t| t.kind() == kind)
        .filter(|t| is_trigger_active(position, t))
    {
        let Some(annotation) = annotations
            .iter()
            .find(|a| a.code == trigger.target_code())
        else {
            log::trace!("trigger target '{}' not found", trigger.target_code());
            continue;
        };
        if !out.iter().any(|a| a.code == annotation.code) {
            out.push(annotation);
        }
    }
    out
}

/// Remove previously closed annotations from the available list.
pub fn find_active_annotations<'a>(
    available: &[&'a AnnotationConfig],
    closed: &ClosedAnnotations,
) -> Vec<&'a AnnotationConfig> {
    available
        .iter()
        .copied()
        .filter(|a| !closed.contains(&a.code))
        .collect()
}

/// Is there at least one blocking annotation in the list.
pub fn has_blocking_annotations(annotations: &[&AnnotationConfig]) -> bool {
    annotations.iter().any(|a| a.blocking)
}

/// Start bound specific to the trigger type.
pub fn find_trigger_start(trigger: &AnnotationTriggerConfig) -> &TriggerPoint {
    match trigger {
        AnnotationTriggerConfig::TimeUpdate { timeupdate, .. } => &timeupdate.start,
        AnnotationTriggerConfig::Route { route, .. } => &route.start,
    }
}

/// Whether a single trigger fires at `position`.
///
/// `timeupdate` triggers read the position as a time; anything that is not a number (a special
/// route symbol, for instance) activates nothing. `route` triggers are not evaluated here.
pub fn is_trigger_active(position: &str, trigger: &AnnotationTriggerConfig) -> bool {
    match trigger {
        AnnotationTriggerConfig::TimeUpdate { timeupdate, .. } => parse_time_position(position)
            .is_some_and(|t| timeupdate.contains(t)),
        AnnotationTriggerConfig::Route { .. } => false,
    }
}

impl TimeUpdateWindow {
    /// `start <= t < end`, or `start <= t` without an end. Non-numeric bounds never match.
    pub fn contains(&self, t: f64) -> bool {
        let Some(start) = self.start.as_time() else {
            return false;
        };
        let before_end = match &self.end {
            None => true,
            Some(end) => end.as_time().is_some_and(|end| t < end),
        };
        start <= t && before_end
    }
}

/// Codes of annotations dismissed while on the current node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedAnnotations {
    codes: HashSet<String>,
}

impl ClosedAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `code` closed. Returns `false` when it already was.
    pub fn close(&mut self, code: &str) -> bool {
        if self.codes.contains(code) {
            return false;
        }
        self.codes.insert(code.to_string())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

/// Result of one recomputation, by annotation code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSnapshot {
    pub available: Vec<String>,
    pub active: Vec<String>,
    pub blocking: bool,
}

impl AnnotationSnapshot {
    /// Evaluate the `timeupdate` triggers at `position` against the closed set.
    pub fn evaluate(
        position: &str,
        annotations: &[AnnotationConfig],
        triggers: &[AnnotationTriggerConfig],
        closed: &ClosedAnnotations,
    ) -> Self {
        let available =
            find_available_annotations(position, TriggerKind::TimeUpdate, annotations, triggers);
        let active = find_active_annotations(&available, closed);
        log::trace!(
            "annotations at {position}: {} available, {} active",
            available.len(),
            active.len()
        );
        Self {
            blocking: has_blocking_annotations(&active),
            available: available.iter().map(|a| a.code.clone()).collect(),
            active: active.iter().map(|a| a.code.clone()).collect(),
        }
    }

    pub fn is_active(&self, code: &str) -> bool {
        self.active.iter().any(|c| c == code)
    }
}
