//! Player configuration model.
//!
//! The wire format is the JSON configuration consumed by the embeddable player: camelCase keys and
//! `type`-tagged objects whose payload sits under a key named after the tag, e.g.
//! `{ "type": "card", "card": { "title": "..." } }`. Every tagged union is a closed Rust enum, so
//! an unknown discriminant is rejected while decoding instead of surfacing at match sites.

use serde::{Deserialize, Serialize};

/// Complete configuration of one player package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlayerConfig {
    pub id: String,
    pub title: String,
    pub flow: NodeFlowConfig,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

impl NodePlayerConfig {
    /// Node configuration by code (first match when codes repeat).
    pub fn node(&self, code: &str) -> Option<&NodeConfig> {
        self.nodes.iter().find(|n| n.code == code)
    }
}

/// Flow topology describing the order of nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeFlowConfig {
    List { list: ListFlowConfig },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFlowConfig {
    #[serde(default)]
    pub nodes: Vec<String>,
}

/// One unit of primary content plus its annotation and trigger catalogs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoContentConfig>,
    #[serde(default)]
    pub annotations: Vec<AnnotationConfig>,
    /// Triggers connecting content movement and annotations.
    #[serde(default)]
    pub triggers: Vec<AnnotationTriggerConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VideoContentConfig {
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileVideoContentConfig>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVideoContentConfig {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

// ---------- annotations

/// Overlay shown on top of the node content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationConfig {
    /// Unique within the owning node.
    pub code: String,
    /// While active, primary content playback must be paused.
    #[serde(default)]
    pub blocking: bool,
    /// A close affordance is offered; closing adds the code to the node's closed set.
    #[serde(default)]
    pub dismissible: bool,
    #[serde(default)]
    pub position: AnnotationPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<AnnotationDimensions>,
    #[serde(flatten)]
    pub kind: AnnotationKind,
}

impl AnnotationConfig {
    pub fn annotation_type(&self) -> AnnotationType {
        match &self.kind {
            AnnotationKind::Card { .. } => AnnotationType::Card,
            AnnotationKind::ExternalContent { .. } => AnnotationType::ExternalContent,
            AnnotationKind::Chapter { .. } => AnnotationType::Chapter,
        }
    }

    /// Placement box the rendering layer applies to the overlay container.
    pub fn layout(&self) -> OverlayLayout {
        let mut layout = match &self.position {
            AnnotationPosition::Static { offsets } => OverlayLayout {
                top: offsets.top.clone(),
                right: offsets.right.clone(),
                bottom: offsets.bottom.clone(),
                left: offsets.left.clone(),
                ..OverlayLayout::default()
            },
            AnnotationPosition::None => OverlayLayout::default(),
        };
        if let Some(dim) = &self.dimensions {
            layout.width = dim.width.clone();
            layout.height = dim.height.clone();
        }
        layout
    }
}

/// Type-specific annotation payload, keyed by the `type` discriminant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationKind {
    Card {
        card: CardAnnotationConfig,
    },
    ExternalContent {
        externalcontent: ExternalContentAnnotationConfig,
    },
    Chapter {
        chapter: ChapterAnnotationConfig,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    Card,
    ExternalContent,
    Chapter,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAnnotationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalContentAnnotationConfig {
    /// Selector of the host element that gets moved into the overlay.
    pub selector: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterAnnotationConfig {
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationPosition {
    Static {
        #[serde(rename = "static", default)]
        offsets: StaticOffsets,
    },
    #[default]
    None,
}

/// CSS lengths, passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticOffsets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

// ---------- triggers

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    TimeUpdate,
    Route,
}

/// Rule binding an annotation to an activation window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationTriggerConfig {
    TimeUpdate {
        #[serde(rename = "targetCode")]
        target_code: String,
        timeupdate: TimeUpdateWindow,
    },
    Route {
        #[serde(rename = "targetCode")]
        target_code: String,
        route: RouteWindow,
    },
}

impl AnnotationTriggerConfig {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::TimeUpdate { .. } => TriggerKind::TimeUpdate,
            Self::Route { .. } => TriggerKind::Route,
        }
    }

    /// Code of the annotation this trigger activates.
    pub fn target_code(&self) -> &str {
        match self {
            Self::TimeUpdate { target_code, .. } | Self::Route { target_code, .. } => target_code,
        }
    }
}

/// Half-open `[start, end)` window; no `end` means unbounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeUpdateWindow {
    pub start: TriggerPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<TriggerPoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteWindow {
    pub start: TriggerPoint,
}

/// Trigger bound, given either as a number or as a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerPoint {
    Number(f64),
    Text(String),
}

impl TriggerPoint {
    /// Numeric value of the bound, `None` when it is not a number.
    pub fn as_time(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// The bound as a route position string.
    pub fn to_position(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for TriggerPoint {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TriggerPoint {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_tagged_annotation_payloads() {
        let raw = json!({
            "code": "annot-2",
            "type": "card",
            "blocking": true,
            "dismissible": true,
            "position": { "type": "static", "static": { "top": "0px", "left": "0px" } },
            "dimensions": { "width": "100%", "height": "100%" },
            "card": { "title": "blocking card" }
        });
        let ann: AnnotationConfig = serde_json::from_value(raw).unwrap();
        assert_eq!(ann.annotation_type(), AnnotationType::Card);
        assert!(ann.blocking && ann.dismissible);
        let layout = ann.layout();
        assert_eq!(layout.top.as_deref(), Some("0px"));
        assert_eq!(layout.right, None);
        assert_eq!(layout.width.as_deref(), Some("100%"));

        let ext: AnnotationConfig = serde_json::from_value(json!({
            "code": "ext",
            "type": "externalcontent",
            "position": { "type": "none" },
            "externalcontent": { "selector": "#el" }
        }))
        .unwrap();
        assert_eq!(ext.annotation_type(), AnnotationType::ExternalContent);
        assert!(!ext.blocking);
        assert_eq!(ext.layout(), OverlayLayout::default());
    }

    #[test]
    fn rejects_unknown_discriminants() {
        let bad_ann = json!({ "code": "a", "type": "popup", "popup": {} });
        assert!(serde_json::from_value::<AnnotationConfig>(bad_ann).is_err());

        let bad_trigger = json!({ "type": "click", "targetCode": "a", "click": {} });
        assert!(serde_json::from_value::<AnnotationTriggerConfig>(bad_trigger).is_err());

        let bad_flow = json!({ "type": "graph", "graph": {} });
        assert!(serde_json::from_value::<NodeFlowConfig>(bad_flow).is_err());
    }

    #[test]
    fn trigger_points_accept_numbers_and_strings() {
        let t: AnnotationTriggerConfig = serde_json::from_value(json!({
            "type": "timeupdate",
            "targetCode": "x",
            "timeupdate": { "start": "3", "end": 7 }
        }))
        .unwrap();
        assert_eq!(t.kind(), TriggerKind::TimeUpdate);
        assert_eq!(t.target_code(), "x");
        let AnnotationTriggerConfig::TimeUpdate { timeupdate, .. } = &t else {
            panic!("expected timeupdate trigger");
        };
        assert_eq!(timeupdate.start.as_time(), Some(3.0));
        assert_eq!(timeupdate.end.as_ref().and_then(TriggerPoint::as_time), Some(7.0));

        assert_eq!(TriggerPoint::from("abc").as_time(), None);
        assert_eq!(TriggerPoint::from(12.0).to_position(), "12");
        assert_eq!(TriggerPoint::from(1.5).to_position(), "1.5");
    }

    #[test]
    fn flow_and_video_round_trip() {
        let raw = json!({
            "id": "package-1",
            "title": "Package 1",
            "flow": { "type": "list", "list": { "nodes": ["node-1"] } },
            "nodes": [{
                "code": "node-1",
                "video": { "type": "file", "file": { "src": "./demo.mp4" } },
                "annotations": [],
                "triggers": []
            }]
        });
        let cfg: NodePlayerConfig = serde_json::from_value(raw.clone()).unwrap();
        let NodeFlowConfig::List { list } = &cfg.flow;
        assert_eq!(list.nodes, vec!["node-1".to_string()]);
        assert!(cfg.node("node-1").is_some());
        assert!(cfg.node("node-2").is_none());

        let back = serde_json::to_value(&cfg).unwrap();
        assert_eq!(back["flow"], raw["flow"]);
        assert_eq!(back["nodes"][0]["video"], raw["nodes"][0]["video"]);
    }
}
