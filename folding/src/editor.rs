use std::ops::Range;

/// A caret or marker endpoint: a line index plus a character offset
/// within that line. Ordering is line-major, so span containment checks
/// can compare positions directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Position { line, ch }
    }
}

/// Handle for a text-replacement marker, assigned by the editor surface
/// at creation time. Stable for the marker's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Handle for a rendered line widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

/// The slice of an editor the fold engine needs: line access, the
/// visible viewport, the caret, text-replacement markers, and line
/// widgets. Hosts implement this against their real editor; tests use
/// [`crate::MemoryEditor`].
///
/// Markers replace a text span visually with a placeholder while the
/// underlying text stays in the document. Widgets are rendered markup
/// anchored below a line. The engine always creates and clears them in
/// pairs.
pub trait EditorSurface {
    fn line_count(&self) -> usize;

    /// Text of the given line without its trailing newline.
    /// None past the end of the document.
    fn line(&self, index: usize) -> Option<&str>;

    /// Currently visible line range.
    fn viewport(&self) -> Range<usize>;

    fn caret(&self) -> Position;

    fn set_caret(&mut self, pos: Position);

    /// Visually replace `from..=to` with `placeholder`, tagged with a
    /// class name the engine uses to recognize its own markers.
    fn mark_text(
        &mut self,
        from: Position,
        to: Position,
        placeholder: &str,
        class: &str,
    ) -> MarkerId;

    /// Remove a marker, restoring the raw text. Unknown ids are ignored.
    fn clear_marker(&mut self, id: MarkerId);

    /// The span a marker covers, if it is still active.
    fn marker_span(&self, id: MarkerId) -> Option<(Position, Position)>;

    /// All markers whose span contains `pos`, with their class names.
    fn marks_at(&self, pos: Position) -> Vec<(MarkerId, String)>;

    /// Attach rendered markup as a widget anchored below `line`.
    fn add_widget(&mut self, line: usize, html: &str) -> WidgetId;

    /// Remove a widget. Unknown ids are ignored.
    fn clear_widget(&mut self, id: WidgetId);

    /// Group subsequent mutations into one update, bounding layout
    /// churn. Hosts without batching can leave the defaults.
    fn begin_operation(&mut self) {}

    fn end_operation(&mut self) {}

    /// Cosmetic hook: hosts that paint a background decoration behind
    /// fenced code blocks can strip it for a folded range.
    fn clear_code_background(&mut self, lines: Range<usize>) {
        let _ = lines;
    }
}
