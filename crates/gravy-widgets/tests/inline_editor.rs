use gravy_test_support::Recorder;
use gravy_widgets::{DISCARD_PROMPT, EditorEvent, InlineEditor, InlineEditorOptions};

fn refuse(recorder: &Recorder) -> impl FnMut(&str) -> bool + '_ {
    move |message: &str| {
        recorder.record(message);
        false
    }
}

#[test]
fn save_with_changes_encodes_and_formats() {
    let mut editor = InlineEditor::new(InlineEditorOptions::default())
        .with_formatter(|encoded| format!("<em>{encoded}</em>"));
    let _ = editor.start_edit("old title");

    let event = editor.submit("new <title>");
    assert_eq!(
        event,
        Some(EditorEvent::Complete {
            value: "new <title>".to_string(),
            initial: "new <title>".to_string(),
            html: Some("<em>new &lt;title&gt;</em>".to_string()),
        })
    );
    assert!(!editor.is_editing());
    assert_eq!(editor.initial_value(), "new <title>");
}

#[test]
fn unchanged_save_is_silent_unless_requested() {
    let mut quiet = InlineEditor::new(InlineEditorOptions::default());
    let _ = quiet.start_edit("same");
    assert!(quiet.submit("same").is_none());

    let mut chatty = InlineEditor::new(InlineEditorOptions {
        notify_unchanged_completion: true,
        ..InlineEditorOptions::default()
    });
    let _ = chatty.start_edit("same");
    assert_eq!(
        chatty.submit("same"),
        Some(EditorEvent::Complete {
            value: "same".to_string(),
            initial: "same".to_string(),
            html: None,
        })
    );
}

#[test]
fn dirty_tracks_field_against_initial_value() {
    let mut editor = InlineEditor::new(InlineEditorOptions::default());
    assert!(!editor.dirty("anything"));

    let _ = editor.start_edit("a &amp; b");
    assert!(!editor.dirty("a & b"));
    assert!(editor.dirty("a & c"));
}

#[test]
fn declined_cancel_keeps_editing() {
    let recorder = Recorder::new();
    let mut editor = InlineEditor::new(InlineEditorOptions::default());
    let _ = editor.start_edit("draft");

    let mut confirm = refuse(&recorder);
    assert!(editor.cancel("draft edited", false, &mut confirm).is_none());
    assert!(editor.is_editing());
    assert_eq!(recorder.entries(), vec![DISCARD_PROMPT.to_string()]);

    assert_eq!(
        editor.cancel("draft edited", true, &mut confirm),
        Some(EditorEvent::Cancel {
            initial: "draft".to_string()
        })
    );
    assert!(!editor.is_editing());
    assert_eq!(recorder.len(), 1);
}

#[test]
fn clean_cancel_skips_prompt() {
    let recorder = Recorder::new();
    let mut editor = InlineEditor::new(InlineEditorOptions::default());
    let _ = editor.start_edit("clean");

    let mut confirm = refuse(&recorder);
    assert!(editor.cancel("clean", false, &mut confirm).is_some());
    assert!(recorder.is_empty());
}

#[test]
fn begin_edit_serialises_with_type_tag() {
    let mut editor = InlineEditor::new(InlineEditorOptions::default());
    let event = editor.start_edit("x").expect("begin edit");
    let value = serde_json::to_value(&event).expect("serialize event");
    assert_eq!(
        value,
        serde_json::json!({ "type": "begin_edit", "field_value": "x" })
    );
}
