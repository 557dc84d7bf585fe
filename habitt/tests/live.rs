use folding::{EditorSurface, MemoryEditor, Position};
use habitt::HabitSettings;
use habitt::live::{FOLDED_TEXT, MARKER_CLASS, habit_fold_engine};

const DOC: &str = "# Notes\n```habitt\n[month: 2021-02]\n(1)(14,love)\n```\nafter";

fn editor() -> MemoryEditor {
    let mut editor = MemoryEditor::new(DOC);
    // Park the caret outside the block.
    editor.set_caret(Position::new(5, 0));
    editor
}

#[test]
fn folds_habit_block_into_calendar_widget() {
    let mut editor = editor();
    let mut engine = habit_fold_engine(HabitSettings::default());
    engine.process(&mut editor);

    assert_eq!(editor.marker_count(), 1);
    assert_eq!(editor.placeholders(), vec![FOLDED_TEXT]);

    let widgets = editor.widgets_at(4);
    assert_eq!(widgets.len(), 1);
    assert!(widgets[0].contains("habitt-div"));
    assert!(widgets[0].contains("habitt-td--14 habitt-td--checked"));
    assert!(widgets[0].contains("love"));
}

#[test]
fn marker_carries_the_habit_class() {
    let mut editor = editor();
    let mut engine = habit_fold_engine(HabitSettings::default());
    engine.process(&mut editor);

    let marks = editor.marks_at(Position::new(1, 0));
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].1, MARKER_CLASS);
}

#[test]
fn broken_block_folds_to_plain_text() {
    let mut editor = MemoryEditor::new("```habitt\nno month directive\n```\ntail");
    editor.set_caret(Position::new(3, 0));
    let mut engine = habit_fold_engine(HabitSettings::default());
    engine.process(&mut editor);

    let widgets = editor.widgets_at(2);
    assert_eq!(widgets.len(), 1);
    assert!(widgets[0].contains("<div>no month directive</div>"));
    assert!(!widgets[0].contains("habitt-div"));
}

#[test]
fn unfold_round_trip_preserves_document() {
    let mut editor = editor();
    let original = editor.text();
    let mut engine = habit_fold_engine(HabitSettings::default());
    engine.process(&mut editor);

    let cleared = engine.unfold_at(&mut editor, Position::new(2, 0));
    assert!(cleared);
    assert_eq!(editor.text(), original);
    assert_eq!(editor.marker_count(), 0);
    assert_eq!(editor.widget_count(), 0);
}

#[test]
fn code_block_background_cleanup_is_requested() {
    let mut editor = editor();
    let mut engine = habit_fold_engine(HabitSettings::default());
    assert!(engine.options().code_block);
    engine.process(&mut editor);
    assert_eq!(editor.cleared_backgrounds, vec![1..5]);
}
