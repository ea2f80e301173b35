//! Translate touch events into the mouse events older widgets listen for.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// Event names proxied when the caller does not pick a subset.
pub const DEFAULT_TOUCH_EVENTS: &str = "touchstart touchmove touchend";

/// Touch events that can be proxied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchKind {
    /// `touchstart`
    #[serde(rename = "touchstart")]
    Start,
    /// `touchmove`
    #[serde(rename = "touchmove")]
    Move,
    /// `touchend`
    #[serde(rename = "touchend")]
    End,
}

impl TouchKind {
    /// DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "touchstart",
            Self::Move => "touchmove",
            Self::End => "touchend",
        }
    }
}

impl FromStr for TouchKind {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "touchstart" => Ok(Self::Start),
            "touchmove" => Ok(Self::Move),
            "touchend" => Ok(Self::End),
            other => Err(WidgetError::UnknownTouchEvent {
                value: other.to_string(),
            }),
        }
    }
}

/// Mouse events synthesised from touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseKind {
    /// `mousedown`
    #[serde(rename = "mousedown")]
    Down,
    /// `mousemove`
    #[serde(rename = "mousemove")]
    Move,
    /// `mouseup`
    #[serde(rename = "mouseup")]
    Up,
}

impl MouseKind {
    /// DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "mousedown",
            Self::Move => "mousemove",
            Self::Up => "mouseup",
        }
    }
}

impl From<TouchKind> for MouseKind {
    fn from(kind: TouchKind) -> Self {
        match kind {
            TouchKind::Start => Self::Down,
            TouchKind::Move => Self::Move,
            TouchKind::End => Self::Up,
        }
    }
}

/// Coordinates of one changed touch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Horizontal screen coordinate.
    pub screen_x: f64,
    /// Vertical screen coordinate.
    pub screen_y: f64,
    /// Horizontal viewport coordinate.
    pub client_x: f64,
    /// Vertical viewport coordinate.
    pub client_y: f64,
}

/// Mouse event the host should dispatch on the touch target.
///
/// If the host reports that the dispatched event was cancelled, it should
/// prevent the default action of the original touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticMouseEvent {
    /// Mouse event type.
    pub kind: MouseKind,
    /// Always `true`.
    pub bubbles: bool,
    /// Always `true`.
    pub cancelable: bool,
    /// Click count; always 1.
    pub detail: u32,
    /// Primary button.
    pub button: u16,
    /// Horizontal screen coordinate.
    pub screen_x: f64,
    /// Vertical screen coordinate.
    pub screen_y: f64,
    /// Horizontal viewport coordinate.
    pub client_x: f64,
    /// Vertical viewport coordinate.
    pub client_y: f64,
}

/// Parse a space-separated list of touch event names.
///
/// # Errors
///
/// Returns [`WidgetError::UnknownTouchEvent`] for any name that is not a
/// supported touch event.
pub fn parse_touch_events(events: &str) -> WidgetResult<Vec<TouchKind>> {
    events.split_whitespace().map(str::parse).collect()
}

/// Build the mouse event for a touch, using the first changed touch point.
///
/// Returns `None` when the touch event carried no changed touches.
#[must_use]
pub fn translate(kind: TouchKind, changed_touches: &[TouchPoint]) -> Option<SyntheticMouseEvent> {
    let first = changed_touches.first()?;
    Some(SyntheticMouseEvent {
        kind: kind.into(),
        bubbles: true,
        cancelable: true,
        detail: 1,
        button: 0,
        screen_x: first.screen_x,
        screen_y: first.screen_y,
        client_x: first.client_x,
        client_y: first.client_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_event_list_parses() {
        let kinds = parse_touch_events(DEFAULT_TOUCH_EVENTS).expect("default list");
        assert_eq!(kinds, vec![TouchKind::Start, TouchKind::Move, TouchKind::End]);
    }

    #[test]
    fn unknown_event_names_are_rejected() {
        let err = parse_touch_events("touchstart pinch").expect_err("pinch is unknown");
        assert_eq!(
            err,
            WidgetError::UnknownTouchEvent {
                value: "pinch".to_string()
            }
        );
    }

    #[test]
    fn touches_map_to_mouse_events() {
        assert_eq!(MouseKind::from(TouchKind::Start).as_str(), "mousedown");
        assert_eq!(MouseKind::from(TouchKind::Move).as_str(), "mousemove");
        assert_eq!(MouseKind::from(TouchKind::End).as_str(), "mouseup");
        assert_eq!(TouchKind::End.as_str(), "touchend");
    }

    #[test]
    fn translate_uses_first_changed_touch() {
        let touches = [
            TouchPoint {
                screen_x: 1.0,
                screen_y: 2.0,
                client_x: 3.0,
                client_y: 4.0,
            },
            TouchPoint::default(),
        ];
        let event = translate(TouchKind::Move, &touches).expect("event");
        assert_eq!(event.kind, MouseKind::Move);
        assert!(event.bubbles && event.cancelable);
        assert_eq!(event.detail, 1);
        assert!((event.client_y - 4.0).abs() < f64::EPSILON);
        assert!(translate(TouchKind::End, &[]).is_none());
    }
}
