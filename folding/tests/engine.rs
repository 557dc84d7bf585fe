use std::time::{Duration, Instant};

use folding::{Debouncer, EditorSurface, FoldEngine, FoldOptions, MemoryEditor, Position, scan};
use regex::Regex;

const DOC: &str = "intro\n```habitt\n[month: 2021-01]\n(1)\n```\ntail";

fn begin_token() -> Regex {
    Regex::new(r"^\s*```habitt").unwrap()
}

fn end_token() -> Regex {
    Regex::new(r"^\s*```").unwrap()
}

fn engine() -> FoldEngine {
    FoldEngine::new(
        begin_token(),
        end_token(),
        Box::new(|_begin, _end, content| format!("<p>{} bytes</p>", content.len())),
        FoldOptions {
            marker_class: "habit-tracker-marker".to_owned(),
            folded_text: "<folded>".to_owned(),
            code_block: true,
            ..FoldOptions::default()
        },
    )
}

fn parked_caret(editor: &mut MemoryEditor) {
    // Last line, outside any block.
    editor.set_caret(Position::new(5, 0));
}

#[test]
fn scan_finds_block_and_content() {
    let editor = MemoryEditor::new(DOC);
    let ranges = scan(&editor, &begin_token(), &end_token());
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].from_line, 1);
    assert_eq!(ranges[0].to_line, 4);
    assert_eq!(ranges[0].begin_match, "```habitt");
    assert_eq!(ranges[0].end_match, "```");
    assert_eq!(ranges[0].content, "[month: 2021-01]\n(1)");
}

#[test]
fn stray_end_token_yields_nothing() {
    let editor = MemoryEditor::new("text\n```\nmore\n```\nend");
    let ranges = scan(&editor, &begin_token(), &end_token());
    assert!(ranges.is_empty());
}

#[test]
fn scan_finds_multiple_blocks() {
    let doc = "```habitt\na\n```\nplain\n```habitt\nb\n```";
    let editor = MemoryEditor::new(doc);
    let ranges = scan(&editor, &begin_token(), &end_token());
    assert_eq!(ranges.len(), 2);
    assert_eq!((ranges[0].from_line, ranges[0].to_line), (0, 2));
    assert_eq!((ranges[1].from_line, ranges[1].to_line), (4, 6));
}

#[test]
fn block_ending_past_viewport_is_closed() {
    let mut editor = MemoryEditor::new(DOC);
    // Viewport cuts the block off after its body starts.
    editor.set_viewport(0..3);
    let ranges = scan(&editor, &begin_token(), &end_token());
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].to_line, 4);
    assert_eq!(ranges[0].content, "[month: 2021-01]\n(1)");
}

#[test]
fn block_never_closed_yields_nothing() {
    let editor = MemoryEditor::new("```habitt\n[month: 2021-01]\nno end here");
    let ranges = scan(&editor, &begin_token(), &end_token());
    assert!(ranges.is_empty());
}

#[test]
fn fold_attaches_marker_and_widget() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let mut engine = engine();
    engine.process(&mut editor);

    assert_eq!(engine.active_folds(), 1);
    assert_eq!(editor.marker_count(), 1);
    assert_eq!(editor.widget_count(), 1);
    assert_eq!(editor.placeholders(), vec!["<folded>"]);

    let widgets = editor.widgets_at(4);
    assert_eq!(widgets.len(), 1);
    assert_eq!(
        widgets[0],
        "<div class=\"block-fold-widget\"><p>20 bytes</p></div>"
    );
}

#[test]
fn folding_is_idempotent() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let mut engine = engine();
    engine.process(&mut editor);
    engine.process(&mut editor);
    engine.process(&mut editor);

    assert_eq!(engine.active_folds(), 1);
    assert_eq!(editor.marker_count(), 1);
    assert_eq!(editor.widget_count(), 1);
}

#[test]
fn mutations_are_batched_per_pass() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let mut engine = engine();
    engine.process(&mut editor);
    assert_eq!(editor.operations, 1);
}

#[test]
fn caret_inside_block_blocks_folding() {
    let mut editor = MemoryEditor::new(DOC);
    let mut engine = engine();

    for line in 1..=4 {
        editor.set_caret(Position::new(line, 0));
        engine.process(&mut editor);
        assert_eq!(editor.marker_count(), 0, "caret on line {line} must block folding");
    }

    parked_caret(&mut editor);
    engine.process(&mut editor);
    assert_eq!(editor.marker_count(), 1);
}

#[test]
fn unfold_restores_raw_text_and_clears_both_halves() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let original = editor.text();

    let mut engine = engine();
    engine.process(&mut editor);
    assert_eq!(editor.text(), original, "marking must not touch the buffer");

    let cleared = engine.unfold_at(&mut editor, Position::new(1, 0));
    assert!(cleared);
    assert_eq!(editor.text(), original);
    assert_eq!(editor.marker_count(), 0);
    assert_eq!(editor.widget_count(), 0);
    assert_eq!(engine.active_folds(), 0);
}

#[test]
fn unfold_at_ignores_foreign_markers() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    editor.mark_text(
        Position::new(0, 0),
        Position::new(0, 5),
        "other",
        "someone-elses-marker",
    );

    let mut engine = engine();
    assert!(!engine.unfold_at(&mut editor, Position::new(0, 0)));
    assert_eq!(editor.marker_count(), 1);
}

#[test]
fn unfold_for_edit_parks_caret_on_first_interior_line() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let mut engine = engine();
    engine.process(&mut editor);

    let (marker, _) = editor.marks_at(Position::new(1, 0))[0];
    engine.unfold_for_edit(&mut editor, marker);

    assert_eq!(editor.marker_count(), 0);
    assert_eq!(editor.widget_count(), 0);
    assert_eq!(editor.caret(), Position::new(2, 0));
}

#[test]
fn code_block_cleanup_covers_folded_ranges() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let mut engine = engine();
    engine.process(&mut editor);
    assert_eq!(editor.cleared_backgrounds, vec![1..5]);
}

#[test]
fn debouncer_fires_once_after_quiet_period() {
    let mut debounce = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();

    debounce.trigger(t0);
    assert!(!debounce.poll(t0 + Duration::from_millis(50)));
    assert!(debounce.poll(t0 + Duration::from_millis(100)));
    // Fires at most once per trigger.
    assert!(!debounce.poll(t0 + Duration::from_millis(200)));
}

#[test]
fn debouncer_coalesces_bursts() {
    let mut debounce = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();

    // A trigger inside the quiet period pushes the deadline back.
    debounce.trigger(t0);
    debounce.trigger(t0 + Duration::from_millis(60));
    assert!(!debounce.poll(t0 + Duration::from_millis(120)));
    assert!(debounce.poll(t0 + Duration::from_millis(160)));
}

#[test]
fn engine_tick_folds_after_debounce() {
    let mut editor = MemoryEditor::new(DOC);
    parked_caret(&mut editor);
    let mut engine = engine();
    let t0 = Instant::now();

    engine.notify(t0);
    assert!(!engine.tick(&mut editor, t0 + Duration::from_millis(10)));
    assert_eq!(editor.marker_count(), 0);

    assert!(engine.tick(&mut editor, t0 + Duration::from_millis(150)));
    assert_eq!(editor.marker_count(), 1);
}
