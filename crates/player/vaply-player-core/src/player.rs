//! The node player: owns configuration, current route and node session.
//!
//! Inputs arrive as explicit calls (address change, content clock tick, dismissal, content end).
//! Each call recomputes the derived annotation sets and returns the difference as [`Outputs`].

use crate::address::{Route, NEXT_NODE};
use crate::annotation::AnnotationSnapshot;
use crate::config::PlayerProps;
use crate::diagnostics::log_config_issues;
use crate::error::{PlayerError, PlayerResult};
use crate::model::{NodeConfig, NodePlayerConfig};
use crate::outputs::{AnnotationView, Outputs, PlayerEvent, PlayerFrame};
use crate::position::{position_to_time, resolve_content_position, ContentTimeline};
use crate::router::{resolve_address, ResolvedRoute};
use crate::session::NodeSession;

#[derive(Clone, Debug)]
pub struct NodePlayer {
    config: NodePlayerConfig,
    route: ResolvedRoute,
    session: NodeSession,
    snapshot: AnnotationSnapshot,
    /// Content position requested by the last navigation and not yet applied by the host.
    pending_seek: Option<String>,
}

impl NodePlayer {
    /// Build a player and resolve the initial address. Fails only when the flow is empty and no
    /// node code was given.
    pub fn new(config: NodePlayerConfig, address: Option<&str>) -> PlayerResult<Self> {
        log_config_issues(&config);
        let route = resolve_address(address, config.flow.as_flow())?;
        let mut player = Self {
            session: NodeSession::new(route.node_code.clone()),
            route,
            config,
            snapshot: AnnotationSnapshot::default(),
            pending_seek: None,
        };
        if player.current_node().is_none() {
            log::warn!("route {} points at an unknown node", player.route.to_address());
        }
        player.pending_seek = player.content_position();
        player.snapshot = player.evaluate();
        log::debug!("player '{}' started at {}", player.config.id, player.address());
        Ok(player)
    }

    pub fn from_props(props: PlayerProps) -> PlayerResult<Self> {
        Self::new(props.config, props.current_address.as_deref())
    }

    pub fn config(&self) -> &NodePlayerConfig {
        &self.config
    }

    pub fn route(&self) -> &ResolvedRoute {
        &self.route
    }

    /// Canonical address of the resolved route.
    pub fn address(&self) -> String {
        self.route.to_address()
    }

    pub fn session(&self) -> &NodeSession {
        &self.session
    }

    pub fn snapshot(&self) -> &AnnotationSnapshot {
        &self.snapshot
    }

    pub fn pending_seek(&self) -> Option<&str> {
        self.pending_seek.as_deref()
    }

    pub fn is_blocked(&self) -> bool {
        self.snapshot.blocking
    }

    /// Node configuration by code.
    pub fn node(&self, code: &str) -> PlayerResult<&NodeConfig> {
        self.config
            .node(code)
            .ok_or_else(|| PlayerError::UnknownNode {
                code: code.to_string(),
            })
    }

    /// Configuration of the node the route points at, if there is one.
    pub fn current_node(&self) -> Option<&NodeConfig> {
        self.node(&self.route.node_code).ok()
    }

    /// Navigate. Re-applying the current address re-requests its seek.
    ///
    /// On error (empty flow) the player keeps its previous state.
    pub fn set_address(&mut self, address: Option<&str>) -> PlayerResult<Outputs> {
        let route = resolve_address(address, self.config.flow.as_flow())?;
        let mut out = Outputs::default();

        if route != self.route {
            out.push_event(PlayerEvent::RouteChanged {
                address: route.to_address(),
                route: route.clone(),
            });
        }

        if route.node_code != self.session.node_code() {
            self.leave_node(&mut out);
            let previous = self.session.node_code().to_string();
            self.session = NodeSession::new(route.node_code.clone());
            log::debug!("entering node '{}' from '{previous}'", route.node_code);
            out.push_event(PlayerEvent::NodeEntered {
                node_code: route.node_code.clone(),
                previous: Some(previous),
            });
        }
        self.route = route;
        if self.current_node().is_none() {
            log::warn!("route {} points at an unknown node", self.route.to_address());
        }

        self.refresh(&mut out);

        self.pending_seek = self.content_position();
        if let Some(position) = &self.pending_seek {
            out.push_event(PlayerEvent::SeekRequested {
                position: position.clone(),
            });
        }
        Ok(out)
    }

    /// Content clock tick, in node-local seconds. Times may go backwards.
    pub fn time_update(&mut self, time: f64) -> PlayerResult<Outputs> {
        if !time.is_finite() {
            return Err(PlayerError::validation(format!(
                "content time must be finite, got {time}"
            )));
        }
        self.session.set_time(time);
        let mut out = Outputs::default();
        self.refresh(&mut out);
        Ok(out)
    }

    /// Dismiss an annotation for the rest of the current node session.
    ///
    /// Codes the current node does not define are ignored and produce no events.
    pub fn close_annotation(&mut self, code: &str) -> Outputs {
        let mut out = Outputs::default();
        let known = self
            .current_node()
            .is_some_and(|n| n.annotations.iter().any(|a| a.code == code));
        if !known {
            log::debug!("ignoring close of unknown annotation '{code}'");
            return out;
        }
        if self.session.close(code) {
            out.push_event(PlayerEvent::AnnotationClosed {
                code: code.to_string(),
            });
            self.refresh(&mut out);
        }
        out
    }

    /// The primary content finished: continue with the next node in the flow.
    pub fn content_ended(&mut self) -> PlayerResult<Outputs> {
        let address = Route::node(self.route.node_code.clone())
            .with_position(NEXT_NODE)
            .to_string();
        self.set_address(Some(&address))
    }

    /// Time the content should jump to for the pending navigation, consuming it.
    /// `None` means keep the current time.
    pub fn seek_time(&mut self, timeline: &(impl ContentTimeline + ?Sized)) -> Option<f64> {
        let position = self.pending_seek.take()?;
        position_to_time(&position, timeline)
    }

    pub fn frame(&self) -> PlayerFrame {
        let node = self.current_node();
        let annotations: Vec<AnnotationView> = node
            .map(|n| {
                self.snapshot
                    .active
                    .iter()
                    .filter_map(|code| n.annotations.iter().find(|a| &a.code == code))
                    .map(AnnotationView::from)
                    .collect()
            })
            .unwrap_or_default();
        PlayerFrame {
            address: self.address(),
            route: self.route.clone(),
            has_node: node.is_some(),
            video: node.and_then(|n| n.video.clone()),
            current_time: self.session.current_time(),
            blocked: self.snapshot.blocking,
            annotations,
        }
    }

    fn content_position(&self) -> Option<String> {
        let triggers = self
            .current_node()
            .map(|n| n.triggers.as_slice())
            .unwrap_or_default();
        resolve_content_position(self.route.position.as_deref(), triggers)
            .filter(|p| !p.is_empty())
    }

    fn evaluate(&self) -> AnnotationSnapshot {
        self.current_node()
            .map(|n| self.session.evaluate(n))
            .unwrap_or_default()
    }

    /// Hide everything shown for the node being left.
    fn leave_node(&mut self, out: &mut Outputs) {
        let previous = std::mem::take(&mut self.snapshot);
        for code in previous.active {
            out.push_event(PlayerEvent::AnnotationHidden { code });
        }
        if previous.blocking {
            out.push_event(PlayerEvent::PlaybackUnblocked);
        }
    }

    /// Recompute annotation sets and report what changed.
    fn refresh(&mut self, out: &mut Outputs) {
        let next = self.evaluate();
        for code in &self.snapshot.active {
            if !next.is_active(code) {
                out.push_event(PlayerEvent::AnnotationHidden { code: code.clone() });
            }
        }
        for code in &next.active {
            if !self.snapshot.is_active(code) {
                out.push_event(PlayerEvent::AnnotationShown { code: code.clone() });
            }
        }
        match (self.snapshot.blocking, next.blocking) {
            (false, true) => out.push_event(PlayerEvent::PlaybackBlocked),
            (true, false) => out.push_event(PlayerEvent::PlaybackUnblocked),
            _ => {}
        }
        self.snapshot = next;
    }
}
