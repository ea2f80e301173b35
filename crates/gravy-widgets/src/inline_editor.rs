//! Edit-in-place field state.
//!
//! The host owns the display element and the input field. This module tracks
//! whether an edit is open, what the display showed when it began, and which
//! notifications to raise on save or cancel.

use std::fmt;

use gravy_text::{collapse_whitespace, html_decode, html_encode, strip, strip_tags};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prompt shown before discarding unsaved changes.
pub const DISCARD_PROMPT: &str =
    "You have unsaved changes. Are you sure you want to discard them?";

/// Options for an inline editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct InlineEditorOptions {
    /// Extra CSS class for the editor form.
    pub cls: String,
    /// Height added to a multi-line field when the editor opens.
    pub extra_height: f64,
    /// Keep the editor open permanently.
    pub force_open: bool,
    /// Use a multi-line field; whitespace runs are preserved.
    pub multiline: bool,
    /// Raise `Complete` even when the value did not change.
    pub notify_unchanged_completion: bool,
    /// Ask before discarding unsaved changes.
    pub prompt_on_cancel: bool,
    /// Render OK/Cancel buttons.
    pub show_buttons: bool,
    /// Render the edit icon.
    pub show_edit_icon: bool,
    /// Open the editor as soon as it is attached.
    pub start_open: bool,
    /// Strip markup from the display text before comparing or editing.
    pub strip_tags: bool,
    /// Only the edit icon (not the display text) opens the editor.
    pub use_edit_icon_only: bool,
}

impl Default for InlineEditorOptions {
    fn default() -> Self {
        Self {
            cls: String::new(),
            extra_height: 100.0,
            force_open: false,
            multiline: false,
            notify_unchanged_completion: false,
            prompt_on_cancel: true,
            show_buttons: true,
            show_edit_icon: true,
            start_open: false,
            strip_tags: false,
            use_edit_icon_only: false,
        }
    }
}

/// Notifications raised by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Editing began; the field should be filled with `field_value`.
    BeginEdit {
        /// Text to place in the input field.
        field_value: String,
    },
    /// Editing finished.
    Complete {
        /// Raw value typed into the field.
        value: String,
        /// Display text after the save.
        initial: String,
        /// New display markup when the value changed.
        html: Option<String>,
    },
    /// Editing was abandoned.
    Cancel {
        /// Display text the edit started from.
        initial: String,
    },
}

/// Yes/no prompt supplied by the host.
pub trait Confirm {
    /// Ask the user `message`; `true` means proceed.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

type Formatter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// State machine behind one edit-in-place field.
pub struct InlineEditor {
    options: InlineEditorOptions,
    formatter: Option<Formatter>,
    initial_value: String,
    editing: bool,
}

impl fmt::Debug for InlineEditor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("InlineEditor")
            .field("options", &self.options)
            .field("has_formatter", &self.formatter.is_some())
            .field("initial_value", &self.initial_value)
            .field("editing", &self.editing)
            .finish()
    }
}

impl InlineEditor {
    /// Construct a closed editor.
    #[must_use]
    pub const fn new(options: InlineEditorOptions) -> Self {
        Self {
            options,
            formatter: None,
            initial_value: String::new(),
            editing: false,
        }
    }

    /// Format saved values before they are shown. The formatter receives the
    /// HTML-encoded value and returns display markup.
    #[must_use]
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &InlineEditorOptions {
        &self.options
    }

    /// Whether the host should open the editor right after attaching it.
    #[must_use]
    pub const fn opens_immediately(&self) -> bool {
        self.options.force_open || self.options.start_open
    }

    /// Whether an edit is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Display text recorded when the current edit began (or at the last save).
    #[must_use]
    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    /// Open the editor over `display_text`.
    ///
    /// Returns `None` when an edit is already open.
    pub fn start_edit(&mut self, display_text: &str) -> Option<EditorEvent> {
        if self.editing {
            return None;
        }

        self.initial_value = display_text.to_string();
        self.editing = true;
        let field_value = html_decode(&self.normalize(display_text)).into_owned();
        debug!("inline edit started");
        Some(EditorEvent::BeginEdit { field_value })
    }

    /// Whether `field_value` differs from what the edit started with.
    #[must_use]
    pub fn dirty(&self, field_value: &str) -> bool {
        self.editing && self.normalize(&self.initial_value) != html_encode(field_value)
    }

    /// Store `field_value` as the new display value.
    ///
    /// Returns `Complete` when the value changed, or always when
    /// `notify_unchanged_completion` is set.
    pub fn save(&mut self, field_value: &str) -> Option<EditorEvent> {
        let encoded = html_encode(field_value);
        let changed = self.normalize(&self.initial_value) != encoded;

        let html = changed.then(|| {
            let html = self
                .formatter
                .as_ref()
                .map_or_else(|| encoded.to_string(), |format| format(encoded.as_ref()));
            self.initial_value = html_decode(&strip_tags(&html)).into_owned();
            html
        });

        if !changed && !self.options.notify_unchanged_completion {
            return None;
        }
        debug!(changed, "inline edit saved");
        Some(EditorEvent::Complete {
            value: field_value.to_string(),
            initial: self.initial_value.clone(),
            html,
        })
    }

    /// Close the editor (unless forced open) and save.
    pub fn submit(&mut self, field_value: &str) -> Option<EditorEvent> {
        self.hide_editor();
        self.save(field_value)
    }

    /// Abandon the edit.
    ///
    /// Unless `force` is set, dirty edits with `prompt_on_cancel` ask
    /// `confirm` first; a refusal leaves the edit open and returns `None`.
    pub fn cancel<C>(
        &mut self,
        field_value: &str,
        force: bool,
        confirm: &mut C,
    ) -> Option<EditorEvent>
    where
        C: Confirm + ?Sized,
    {
        if !force
            && self.options.prompt_on_cancel
            && self.dirty(field_value)
            && !confirm.confirm(DISCARD_PROMPT)
        {
            return None;
        }

        self.hide_editor();
        debug!("inline edit cancelled");
        Some(EditorEvent::Cancel {
            initial: self.initial_value.clone(),
        })
    }

    /// Close the editor. Editors with `force_open` stay open.
    pub const fn hide_editor(&mut self) {
        if !self.options.force_open {
            self.editing = false;
        }
    }

    /// Canonical form of display text used for comparisons.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.to_string();
        if self.options.strip_tags {
            normalized = normalized.replace("<br>", "\n");
            normalized = strip(&strip_tags(&normalized)).to_string();
        }
        if !self.options.multiline {
            normalized = collapse_whitespace(&normalized).into_owned();
        }
        normalized
    }
}
