//! Output contracts from the player core.
//!
//! Every mutating call on [`crate::NodePlayer`] returns an [`Outputs`] batch holding only what
//! changed. [`PlayerFrame`] is the full render state for hosts that redraw from scratch.

use serde::{Deserialize, Serialize};

use crate::model::{AnnotationConfig, AnnotationKind, AnnotationType, OverlayLayout, VideoContentConfig};
use crate::router::ResolvedRoute;

/// Discrete signals for the rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum PlayerEvent {
    /// The resolved route differs from the previous one.
    RouteChanged {
        address: String,
        route: ResolvedRoute,
    },
    /// A new node session began; closed annotations and clock were reset.
    ///
    /// Within one batch it follows the `AnnotationHidden` / `PlaybackUnblocked` events of the node
    /// being left and precedes the `AnnotationShown` / `PlaybackBlocked` events of the new node.
    NodeEntered {
        node_code: String,
        previous: Option<String>,
    },
    AnnotationShown {
        code: String,
    },
    AnnotationHidden {
        code: String,
    },
    /// The viewer dismissed an annotation. Followed by `AnnotationHidden` when it was visible.
    AnnotationClosed {
        code: String,
    },
    /// A blocking annotation became active; pause the content.
    PlaybackBlocked,
    /// No blocking annotation is active any more.
    PlaybackUnblocked,
    /// Move the content to `position`; [`crate::NodePlayer::seek_time`] maps it to a time.
    SeekRequested {
        position: String,
    },
}

/// Events produced by one call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<PlayerEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: PlayerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event: &PlayerEvent) -> bool {
        self.events.contains(event)
    }
}

/// Render view of an active annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationView {
    pub code: String,
    pub annotation_type: AnnotationType,
    pub blocking: bool,
    pub dismissible: bool,
    pub layout: OverlayLayout,
    #[serde(flatten)]
    pub kind: AnnotationKind,
}

impl From<&AnnotationConfig> for AnnotationView {
    fn from(a: &AnnotationConfig) -> Self {
        Self {
            code: a.code.clone(),
            annotation_type: a.annotation_type(),
            blocking: a.blocking,
            dismissible: a.dismissible,
            layout: a.layout(),
            kind: a.kind.clone(),
        }
    }
}

/// Everything needed to draw the player at this moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFrame {
    pub address: String,
    pub route: ResolvedRoute,
    /// `false` when the route points at a node without configuration; nothing is drawn then.
    pub has_node: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoContentConfig>,
    pub current_time: f64,
    pub blocked: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationView>,
}
