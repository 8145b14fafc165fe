//! Route position -> playback time.
//!
//! Two steps, mirroring who knows what:
//! 1. [`resolve_content_position`] (node level) expands annotated positions using the node's
//!    triggers.
//! 2. [`position_to_time`] (content level) maps symbols and decimal times to seconds; only the
//!    content knows its duration, so it is passed in through [`ContentTimeline`].

use crate::address::PositionRef;
use crate::annotation::find_trigger_start;
use crate::model::AnnotationTriggerConfig;

/// Information only the content collaborator has.
pub trait ContentTimeline {
    /// Total duration of the node's primary content, in node-local units.
    fn duration(&self) -> f64;
}

/// A bare number is its own duration.
impl ContentTimeline for f64 {
    fn duration(&self) -> f64 {
        *self
    }
}

/// Lenient base-10 integer parse: optional sign, then the longest run of digits, anything after
/// it is ignored ("12.7" -> 12, "3s" -> 3). `None` when there are no leading digits.
///
/// The digit run is read as `f64`, so arbitrarily long runs stay ordered instead of overflowing.
pub fn parse_time_position(position: &str) -> Option<f64> {
    let s = position.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: f64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Expand an annotated position into the start of the first trigger targeting that annotation.
///
/// Non-annotated positions are returned unchanged. `None` means "keep the current time".
pub fn resolve_content_position(
    position: Option<&str>,
    triggers: &[AnnotationTriggerConfig],
) -> Option<String> {
    let position = position?;
    let PositionRef::Annotated(code) = PositionRef::classify(position) else {
        return Some(position.to_string());
    };
    let start = triggers
        .iter()
        .find(|t| t.target_code() == code)
        .map(|t| find_trigger_start(t).to_position());
    if start.is_none() {
        log::warn!("annotated position '{position}' matches no trigger");
    }
    start
}

/// Map a content position to a concrete time.
pub fn position_to_time(position: &str, timeline: &(impl ContentTimeline + ?Sized)) -> Option<f64> {
    match PositionRef::classify(position) {
        PositionRef::NodeStart | PositionRef::PreviousNode | PositionRef::NextNode => Some(0.0),
        PositionRef::NodeEnd => Some(timeline.duration()),
        PositionRef::Time("") => None,
        PositionRef::Time(p) => {
            let time = parse_time_position(p);
            if time.is_none() {
                log::warn!("position '{p}' is neither a time nor a route symbol");
            }
            time
        }
        PositionRef::Annotated(code) => {
            log::warn!("nested annotated position '#{code}' cannot be mapped to a time");
            None
        }
    }
}

/// Full translation of a resolved route position for a node.
pub fn translate_position(
    position: Option<&str>,
    triggers: &[AnnotationTriggerConfig],
    timeline: &(impl ContentTimeline + ?Sized),
) -> Option<f64> {
    let content_position = resolve_content_position(position, triggers)?;
    position_to_time(&content_position, timeline)
}
