//! Non-fatal configuration checks.
//!
//! Nothing reported here stops the player: duplicates resolve to the first match, orphaned
//! triggers and unparseable bounds never activate anything. The report exists so authors find
//! these mistakes before viewers do.

use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{AnnotationKind, AnnotationTriggerConfig, NodePlayerConfig, TriggerPoint};

/// One problem found in a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
pub enum ConfigIssue {
    /// Two node configurations share a code; lookups see only the first.
    #[serde(rename_all = "camelCase")]
    DuplicateNode { code: String },
    /// Two annotations in one node share a code.
    #[serde(rename_all = "camelCase")]
    DuplicateAnnotation { node_code: String, code: String },
    /// The flow lists a node that has no configuration; routing there renders nothing.
    #[serde(rename_all = "camelCase")]
    MissingNode { code: String },
    #[serde(rename_all = "camelCase")]
    OrphanTrigger {
        node_code: String,
        target_code: String,
    },
    /// A trigger bound that is not a number.
    #[serde(rename_all = "camelCase")]
    UnparseableBound {
        node_code: String,
        target_code: String,
        value: String,
    },
    /// `end <= start`: the window can never contain a time.
    #[serde(rename_all = "camelCase")]
    InvertedWindow {
        node_code: String,
        target_code: String,
    },
    #[serde(rename_all = "camelCase")]
    EmptySelector { node_code: String, code: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNode { code } => write!(f, "duplicate node code '{code}'"),
            Self::DuplicateAnnotation { node_code, code } => {
                write!(f, "node '{node_code}': duplicate annotation code '{code}'")
            }
            Self::MissingNode { code } => write!(f, "flow references unknown node '{code}'"),
            Self::OrphanTrigger {
                node_code,
                target_code,
            } => write!(
                f,
                "node '{node_code}': trigger targets unknown annotation '{target_code}'"
            ),
            Self::UnparseableBound {
                node_code,
                target_code,
                value,
            } => write!(
                f,
                "node '{node_code}': trigger for '{target_code}' has non-numeric bound '{value}'"
            ),
            Self::InvertedWindow {
                node_code,
                target_code,
            } => write!(
                f,
                "node '{node_code}': trigger for '{target_code}' ends before it starts"
            ),
            Self::EmptySelector { node_code, code } => write!(
                f,
                "node '{node_code}': external content annotation '{code}' has an empty selector"
            ),
        }
    }
}

/// Collect every issue in `config`, in configuration order.
pub fn check_config(config: &NodePlayerConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let mut node_codes: HashSet<&str> = HashSet::with_capacity(config.nodes.len());
    for node in &config.nodes {
        if !node_codes.insert(node.code.as_str()) {
            issues.push(ConfigIssue::DuplicateNode {
                code: node.code.clone(),
            });
        }
    }
    for code in config.flow.node_codes() {
        if !node_codes.contains(code.as_str()) {
            issues.push(ConfigIssue::MissingNode { code: code.clone() });
        }
    }

    for node in &config.nodes {
        let mut annotation_codes: HashSet<&str> = HashSet::with_capacity(node.annotations.len());
        for annotation in &node.annotations {
            if !annotation_codes.insert(annotation.code.as_str()) {
                issues.push(ConfigIssue::DuplicateAnnotation {
                    node_code: node.code.clone(),
                    code: annotation.code.clone(),
                });
            }
            if let AnnotationKind::ExternalContent { externalcontent } = &annotation.kind {
                if externalcontent.selector.trim().is_empty() {
                    issues.push(ConfigIssue::EmptySelector {
                        node_code: node.code.clone(),
                        code: annotation.code.clone(),
                    });
                }
            }
        }

        for trigger in &node.triggers {
            let target_code = trigger.target_code();
            if !annotation_codes.contains(target_code) {
                issues.push(ConfigIssue::OrphanTrigger {
                    node_code: node.code.clone(),
                    target_code: target_code.to_string(),
                });
            }
            check_bounds(&node.code, trigger, &mut issues);
        }
    }
    issues
}

fn check_bounds(node_code: &str, trigger: &AnnotationTriggerConfig, issues: &mut Vec<ConfigIssue>) {
    let (start, end) = match trigger {
        AnnotationTriggerConfig::TimeUpdate { timeupdate, .. } => {
            (&timeupdate.start, timeupdate.end.as_ref())
        }
        AnnotationTriggerConfig::Route { route, .. } => (&route.start, None),
    };
    let mut unparseable = |point: &TriggerPoint| {
        let time = point.as_time();
        if time.is_none() {
            issues.push(ConfigIssue::UnparseableBound {
                node_code: node_code.to_string(),
                target_code: trigger.target_code().to_string(),
                value: point.to_position(),
            });
        }
        time
    };
    let start = unparseable(start);
    let end = end.and_then(&mut unparseable);
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            issues.push(ConfigIssue::InvertedWindow {
                node_code: node_code.to_string(),
                target_code: trigger.target_code().to_string(),
            });
        }
    }
}

/// Run [`check_config`] and log each issue as a warning. Returns the issue count.
pub fn log_config_issues(config: &NodePlayerConfig) -> usize {
    let issues = check_config(config);
    for issue in &issues {
        log::warn!("config '{}': {issue}", config.id);
    }
    issues.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_player_config_json;

    #[test]
    fn clean_config_has_no_issues() {
        let cfg = parse_player_config_json(
            r#"{
                "id": "p", "title": "t",
                "flow": { "type": "list", "list": { "nodes": ["a"] } },
                "nodes": [{
                    "code": "a",
                    "annotations": [{ "code": "x", "type": "card", "card": {} }],
                    "triggers": [{ "type": "timeupdate", "targetCode": "x",
                                   "timeupdate": { "start": 1, "end": 5 } }]
                }]
            }"#,
        )
        .unwrap();
        assert!(check_config(&cfg).is_empty());
        assert_eq!(log_config_issues(&cfg), 0);
    }

    #[test]
    fn reports_each_problem_once() {
        let cfg = parse_player_config_json(
            r#"{
                "id": "p", "title": "t",
                "flow": { "type": "list", "list": { "nodes": ["a", "ghost"] } },
                "nodes": [
                    {
                        "code": "a",
                        "annotations": [
                            { "code": "x", "type": "card", "card": {} },
                            { "code": "x", "type": "card", "card": {} },
                            { "code": "e", "type": "externalcontent",
                              "externalcontent": { "selector": " " } }
                        ],
                        "triggers": [
                            { "type": "timeupdate", "targetCode": "nobody",
                              "timeupdate": { "start": 0 } },
                            { "type": "timeupdate", "targetCode": "x",
                              "timeupdate": { "start": "soon", "end": 3 } },
                            { "type": "timeupdate", "targetCode": "e",
                              "timeupdate": { "start": 9, "end": 2 } }
                        ]
                    },
                    { "code": "a" }
                ]
            }"#,
        )
        .unwrap();
        let issues = check_config(&cfg);
        assert_eq!(
            issues,
            vec![
                ConfigIssue::DuplicateNode { code: "a".into() },
                ConfigIssue::MissingNode {
                    code: "ghost".into()
                },
                ConfigIssue::DuplicateAnnotation {
                    node_code: "a".into(),
                    code: "x".into()
                },
                ConfigIssue::EmptySelector {
                    node_code: "a".into(),
                    code: "e".into()
                },
                ConfigIssue::OrphanTrigger {
                    node_code: "a".into(),
                    target_code: "nobody".into()
                },
                ConfigIssue::UnparseableBound {
                    node_code: "a".into(),
                    target_code: "x".into(),
                    value: "soon".into()
                },
                ConfigIssue::InvertedWindow {
                    node_code: "a".into(),
                    target_code: "e".into()
                },
            ]
        );
        assert!(issues[4].to_string().contains("unknown annotation 'nobody'"));
    }

    #[test]
    fn issues_serialize_with_tag() {
        let v = serde_json::to_value(ConfigIssue::MissingNode { code: "z".into() }).unwrap();
        assert_eq!(v, serde_json::json!({ "issue": "missingNode", "code": "z" }));
    }
}
