//! Geometry helpers for placing and revealing elements.
//!
//! # Design
//! - All coordinates are document coordinates in CSS pixels.
//! - Callers measure the page; these functions only do the arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// A document position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub left: f64,
    /// Vertical offset.
    pub top: f64,
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

/// A box anchored at a document position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl Rect {
    /// Construct a rect from its origin and size.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            left: origin.left,
            top: origin.top,
            width: size.width,
            height: size.height,
        }
    }
}

/// The visible part of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Current horizontal scroll offset.
    pub scroll_left: f64,
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Window width.
    pub width: f64,
    /// Window height.
    pub height: f64,
}

impl Viewport {
    fn contains(&self, origin: Point, size: Size) -> bool {
        origin.left >= self.scroll_left
            && origin.left + size.width - self.scroll_left < self.width
            && origin.top >= self.scroll_top
            && origin.top + size.height - self.scroll_top < self.height
    }
}

/// Edge of a box, encoded as `l`, `r`, `t` or `b` in side lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

impl Side {
    /// Parse a one-letter side code.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownSide`] for anything but `l`, `r`, `t`, `b`.
    pub const fn from_code(code: char) -> WidgetResult<Self> {
        match code {
            'l' => Ok(Self::Left),
            'r' => Ok(Self::Right),
            't' => Ok(Self::Top),
            'b' => Ok(Self::Bottom),
            value => Err(WidgetError::UnknownSide { value }),
        }
    }

    /// Capitalised name used in CSS property names (`Left`, `Top`, ...).
    #[must_use]
    pub const fn css_suffix(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

/// Scroll offsets that bring `element` fully into view.
///
/// Only scrolls forward: an element past the right or bottom edge moves the
/// viewport just far enough to show its outer box; anything already visible
/// (or above/left of the viewport) leaves the offsets unchanged.
#[must_use]
pub fn scroll_into_view(viewport: &Viewport, element: &Rect) -> Point {
    let mut scroll = Point {
        left: viewport.scroll_left,
        top: viewport.scroll_top,
    };

    let overflow_left =
        (viewport.scroll_left + viewport.width) - (element.left + element.width);
    if overflow_left < 0.0 {
        scroll.left = viewport.scroll_left - overflow_left;
    }

    let overflow_top = (viewport.scroll_top + viewport.height) - (element.top + element.height);
    if overflow_top < 0.0 {
        scroll.top = viewport.scroll_top - overflow_top;
    }

    scroll
}

/// Preferences for [`position_to_side`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    /// Side codes to try, in order of preference (e.g. `"br"`).
    pub sides: String,
    /// Gap between the anchor and the placed box.
    pub distance: f64,
    /// Clamp the result so the box ends inside the viewport.
    pub fit_on_screen: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            sides: "b".to_string(),
            distance: 0.0,
            fit_on_screen: false,
        }
    }
}

/// Place a box of `size` next to `anchor`.
///
/// Sides are tried in the order given; the first placement that lies fully
/// inside the viewport wins, otherwise the first recognised side is used.
/// Unrecognised side codes are skipped. Returns `None` when no side code is
/// recognised.
#[must_use]
pub fn position_to_side(
    anchor: &Rect,
    size: Size,
    viewport: &Viewport,
    options: &PositionOptions,
) -> Option<Point> {
    let mut best: Option<Point> = None;

    for side in options.sides.chars().filter_map(|code| Side::from_code(code).ok()) {
        let candidate = match side {
            Side::Top => Point {
                left: anchor.left,
                top: anchor.top - size.height - options.distance,
            },
            Side::Bottom => Point {
                left: anchor.left,
                top: anchor.top + anchor.height + options.distance,
            },
            Side::Left => Point {
                left: anchor.left - size.width - options.distance,
                top: anchor.top,
            },
            Side::Right => Point {
                left: anchor.left + anchor.width + options.distance,
                top: anchor.top,
            },
        };

        if viewport.contains(candidate, size) {
            best = Some(candidate);
            break;
        }
        best.get_or_insert(candidate);
    }

    let mut placed = best?;
    if options.fit_on_screen {
        placed.left = placed
            .left
            .min(viewport.scroll_left + viewport.width - size.width);
        placed.top = placed
            .top
            .min(viewport.scroll_top + viewport.height - size.height);
    }
    Some(placed)
}
