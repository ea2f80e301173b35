#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Widget behaviour that does not depend on a live document.
//!
//! The host page is reached only through capabilities the caller supplies:
//! [`StyleSource`] for computed styles, [`Confirm`] for prompts, and plain
//! measurement structs for geometry.
//!
//! Layout: `geometry.rs` (rects, scrolling, side placement), `extents.rs`
//! (border/margin/padding sums), `touch.rs` (touch-to-mouse translation),
//! `autosize.rs` (growing text areas), `inline_editor.rs` (edit-in-place
//! state), `error.rs`.

pub mod autosize;
pub mod error;
pub mod extents;
pub mod geometry;
pub mod inline_editor;
pub mod touch;

pub use autosize::{AutoSizeOptions, AutoSizeTextArea, TextAreaMetrics};
pub use error::{WidgetError, WidgetResult};
pub use extents::{BoxEdge, StyleSource, extents, property_name};
pub use geometry::{
    Point, PositionOptions, Rect, Side, Size, Viewport, position_to_side, scroll_into_view,
};
pub use inline_editor::{Confirm, DISCARD_PROMPT, EditorEvent, InlineEditor, InlineEditorOptions};
pub use touch::{
    MouseKind, SyntheticMouseEvent, TouchKind, TouchPoint, parse_touch_events, translate,
};
