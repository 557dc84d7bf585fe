use std::collections::HashMap;
use std::time::{Duration, Instant};

use regex::Regex;
use tracing::{debug, trace};

use crate::debounce::{DEFAULT_QUIET, Debouncer};
use crate::editor::{EditorSurface, MarkerId, Position, WidgetId};
use crate::scan::{BlockRange, scan};

/// Behavior knobs for a [`FoldEngine`].
#[derive(Debug, Clone)]
pub struct FoldOptions {
    /// Class name stamped on the engine's markers, used to recognize
    /// already-folded regions and to scope unfold-at-position.
    pub marker_class: String,
    /// Placeholder text shown in place of the folded span.
    pub folded_text: String,
    /// Whether hosts should treat a click on the placeholder as an
    /// unfold request (advisory; the host wires the actual event).
    pub clear_on_click: bool,
    /// Whether folded regions are fenced code blocks whose background
    /// decoration should be stripped after folding.
    pub code_block: bool,
    /// Quiet period for the event debouncer.
    pub quiet: Duration,
}

impl Default for FoldOptions {
    fn default() -> Self {
        FoldOptions {
            marker_class: "block-fold".to_owned(),
            folded_text: "···".to_owned(),
            clear_on_click: true,
            code_block: false,
            quiet: DEFAULT_QUIET,
        }
    }
}

/// Renderer invoked with (begin match, end match, block content),
/// returning markup for the fold widget.
pub type BlockRenderer = Box<dyn Fn(&str, &str, &str) -> String>;

/// Content-agnostic line-region folder.
///
/// Scans the visible viewport for begin/end token pairs and replaces
/// each region with a placeholder marker plus a rendered widget
/// anchored at the region's last line. The engine exclusively owns the
/// marker-to-widget association: markers and widgets are always
/// created and cleared in pairs, so no widget can outlive its marker.
pub struct FoldEngine {
    begin: Regex,
    end: Regex,
    renderer: BlockRenderer,
    options: FoldOptions,
    /// Active folds: marker handle → widget handle.
    widgets: HashMap<MarkerId, WidgetId>,
    debounce: Debouncer,
}

impl FoldEngine {
    pub fn new(begin: Regex, end: Regex, renderer: BlockRenderer, options: FoldOptions) -> Self {
        let debounce = Debouncer::new(options.quiet);
        FoldEngine {
            begin,
            end,
            renderer,
            options,
            widgets: HashMap::new(),
            debounce,
        }
    }

    pub fn options(&self) -> &FoldOptions {
        &self.options
    }

    /// Number of currently active folds.
    pub fn active_folds(&self) -> usize {
        self.widgets.len()
    }

    /// Record a caret-movement or viewport-change event. The scan runs
    /// on a later [`tick`](FoldEngine::tick) once the quiet period
    /// elapses, coalescing event bursts into a single pass.
    pub fn notify(&mut self, now: Instant) {
        self.debounce.trigger(now);
    }

    /// Drive the debouncer; runs a scan+fold pass when it fires.
    /// Returns true if a pass ran.
    pub fn tick<E: EditorSurface>(&mut self, editor: &mut E, now: Instant) -> bool {
        if !self.debounce.poll(now) {
            return false;
        }
        self.process(editor);
        true
    }

    /// One scan+fold pass over the visible viewport. All marker and
    /// widget mutations land inside a single grouped editor operation.
    pub fn process<E: EditorSurface>(&mut self, editor: &mut E) {
        let ranges = scan(editor, &self.begin, &self.end);
        if ranges.is_empty() {
            return;
        }
        debug!(blocks = ranges.len(), "fold pass");

        editor.begin_operation();
        for range in &ranges {
            self.fold(editor, range);
        }
        editor.end_operation();

        if self.options.code_block {
            for range in &ranges {
                editor.clear_code_background(range.from_line..range.to_line + 1);
            }
        }
    }

    /// Fold one region. Idempotent: a region already carrying one of
    /// this engine's markers at its first line is left alone. Never
    /// folds around the active caret.
    fn fold<E: EditorSurface>(&mut self, editor: &mut E, range: &BlockRange) {
        let from = Position::new(range.from_line, 0);

        let already_folded = editor
            .marks_at(from)
            .iter()
            .any(|(_, class)| class == &self.options.marker_class);
        if already_folded {
            return;
        }

        let end_len = editor.line(range.to_line).map_or(0, str::len);
        let to = Position::new(range.to_line, end_len);

        let caret = editor.caret();
        if caret >= from && caret <= to {
            trace!(line = caret.line, "caret inside block, fold skipped");
            return;
        }

        let markup = (self.renderer)(&range.begin_match, &range.end_match, &range.content);
        let widget = editor.add_widget(
            range.to_line,
            &format!("<div class=\"block-fold-widget\">{markup}</div>"),
        );
        let marker = editor.mark_text(from, to, &self.options.folded_text, &self.options.marker_class);
        self.widgets.insert(marker, widget);
        trace!(from = range.from_line, to = range.to_line, "folded");
    }

    /// Clear a fold: both the text-replacement marker and its widget,
    /// restoring raw text visibility.
    pub fn unfold<E: EditorSurface>(&mut self, editor: &mut E, marker: MarkerId) {
        editor.clear_marker(marker);
        if let Some(widget) = self.widgets.remove(&marker) {
            editor.clear_widget(widget);
        }
        trace!(marker = marker.0, "unfolded");
    }

    /// Unfold any of this engine's folds covering `pos` (the
    /// click-to-unfold path). Returns true if something was cleared.
    pub fn unfold_at<E: EditorSurface>(&mut self, editor: &mut E, pos: Position) -> bool {
        let ours: Vec<MarkerId> = editor
            .marks_at(pos)
            .into_iter()
            .filter(|(_, class)| class == &self.options.marker_class)
            .map(|(id, _)| id)
            .collect();
        for id in &ours {
            self.unfold(editor, *id);
        }
        !ours.is_empty()
    }

    /// The edit-affordance path: clear the fold and park the caret on
    /// the first interior line of the region.
    pub fn unfold_for_edit<E: EditorSurface>(&mut self, editor: &mut E, marker: MarkerId) {
        let span = editor.marker_span(marker);
        self.unfold(editor, marker);
        if let Some((from, _)) = span {
            editor.set_caret(Position::new(from.line + 1, 0));
        }
    }
}
