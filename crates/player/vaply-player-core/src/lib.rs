//! Vaply player core (renderer-agnostic)
//!
//! Routes a viewer through a flow of content nodes and decides which annotation overlays are
//! visible at each moment. Rendering, media playback and DOM access stay with the host adapter
//! (see `vaply-player-wasm`); this crate only consumes addresses, clock ticks and dismissals and
//! produces routes, annotation sets and events.

pub mod address;
pub mod annotation;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod flow;
pub mod model;
pub mod outputs;
pub mod player;
pub mod position;
pub mod router;
pub mod session;

// Re-exports for consumers (adapters)
pub use address::{
    address_to_route, annotated_position, is_annotated_position, route_to_address, PositionRef,
    Route, NEXT_NODE, NODE_END, NODE_START, PREVIOUS_NODE,
};
pub use annotation::{
    find_active_annotations, find_available_annotations, find_trigger_start,
    has_blocking_annotations, AnnotationSnapshot, ClosedAnnotations,
};
pub use config::{parse_player_config_json, parse_player_props_json, PlayerProps};
pub use diagnostics::{check_config, ConfigIssue};
pub use error::{PlayerError, PlayerResult};
pub use flow::NodeFlow;
pub use model::{
    AnnotationConfig, AnnotationKind, AnnotationTriggerConfig, AnnotationType, NodeConfig,
    NodeFlowConfig, NodePlayerConfig, OverlayLayout, TriggerKind, TriggerPoint,
    VideoContentConfig,
};
pub use outputs::{AnnotationView, Outputs, PlayerEvent, PlayerFrame};
pub use player::NodePlayer;
pub use position::{position_to_time, translate_position, ContentTimeline};
pub use router::{resolve_address, resolve_route, ResolvedRoute};
pub use session::NodeSession;
