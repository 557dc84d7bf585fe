use std::collections::BTreeMap;
use std::ops::Range;

use crate::editor::{EditorSurface, MarkerId, Position, WidgetId};

#[derive(Debug, Clone)]
struct MarkerRecord {
    from: Position,
    to: Position,
    placeholder: String,
    class: String,
}

#[derive(Debug, Clone)]
struct WidgetRecord {
    line: usize,
    html: String,
}

/// In-memory reference implementation of [`EditorSurface`].
///
/// Holds the document as a plain line buffer and does full
/// marker/widget bookkeeping, including operation grouping and the
/// code-background hook, so engine behavior can be asserted end to end
/// without a host editor. Also a worked example for hosts writing a
/// real adapter.
#[derive(Debug)]
pub struct MemoryEditor {
    lines: Vec<String>,
    viewport: Range<usize>,
    caret: Position,
    next_id: u64,
    markers: BTreeMap<u64, MarkerRecord>,
    widgets: BTreeMap<u64, WidgetRecord>,
    op_depth: usize,
    /// Completed grouped operations, for assertions on batching.
    pub operations: usize,
    /// Ranges passed to the code-background cleanup hook.
    pub cleared_backgrounds: Vec<Range<usize>>,
}

impl MemoryEditor {
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        let viewport = 0..lines.len();
        MemoryEditor {
            lines,
            viewport,
            caret: Position::new(0, 0),
            next_id: 1,
            markers: BTreeMap::new(),
            widgets: BTreeMap::new(),
            op_depth: 0,
            operations: 0,
            cleared_backgrounds: Vec::new(),
        }
    }

    /// Restrict the visible line range (defaults to the whole buffer).
    pub fn set_viewport(&mut self, viewport: Range<usize>) {
        self.viewport = viewport;
    }

    /// The full document text, exactly as held in the line buffer.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Placeholders of all active markers, in creation order.
    pub fn placeholders(&self) -> Vec<&str> {
        self.markers.values().map(|m| m.placeholder.as_str()).collect()
    }

    /// Markup of all widgets anchored at `line`.
    pub fn widgets_at(&self, line: usize) -> Vec<&str> {
        self.widgets
            .values()
            .filter(|w| w.line == line)
            .map(|w| w.html.as_str())
            .collect()
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl EditorSurface for MemoryEditor {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn viewport(&self) -> Range<usize> {
        self.viewport.clone()
    }

    fn caret(&self) -> Position {
        self.caret
    }

    fn set_caret(&mut self, pos: Position) {
        self.caret = pos;
    }

    fn mark_text(
        &mut self,
        from: Position,
        to: Position,
        placeholder: &str,
        class: &str,
    ) -> MarkerId {
        let id = self.fresh_id();
        self.markers.insert(
            id,
            MarkerRecord {
                from,
                to,
                placeholder: placeholder.to_owned(),
                class: class.to_owned(),
            },
        );
        MarkerId(id)
    }

    fn clear_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id.0);
    }

    fn marker_span(&self, id: MarkerId) -> Option<(Position, Position)> {
        self.markers.get(&id.0).map(|m| (m.from, m.to))
    }

    fn marks_at(&self, pos: Position) -> Vec<(MarkerId, String)> {
        self.markers
            .iter()
            .filter(|(_, m)| m.from <= pos && pos <= m.to)
            .map(|(id, m)| (MarkerId(*id), m.class.clone()))
            .collect()
    }

    fn add_widget(&mut self, line: usize, html: &str) -> WidgetId {
        let id = self.fresh_id();
        self.widgets.insert(
            id,
            WidgetRecord {
                line,
                html: html.to_owned(),
            },
        );
        WidgetId(id)
    }

    fn clear_widget(&mut self, id: WidgetId) {
        self.widgets.remove(&id.0);
    }

    fn begin_operation(&mut self) {
        self.op_depth += 1;
    }

    fn end_operation(&mut self) {
        if self.op_depth > 0 {
            self.op_depth -= 1;
            if self.op_depth == 0 {
                self.operations += 1;
            }
        }
    }

    fn clear_code_background(&mut self, lines: Range<usize>) {
        self.cleared_backgrounds.push(lines);
    }
}
