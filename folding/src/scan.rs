use regex::Regex;

use crate::editor::EditorSurface;

/// A detected begin/end region. Built fresh on every scan pass and
/// never persisted across passes.
#[derive(Debug, Clone)]
pub struct BlockRange {
    /// Line carrying the begin-token match.
    pub from_line: usize,
    /// Line carrying the end-token match. Always greater than `from_line`.
    pub to_line: usize,
    /// The begin-token text as matched.
    pub begin_match: String,
    /// The end-token text as matched.
    pub end_match: String,
    /// Lines strictly between the tokens, joined with `\n`.
    pub content: String,
}

/// Scan the editor's visible viewport for begin/end token pairs.
///
/// Single linear pass with an inside-block flag: a begin match opens a
/// block, the nearest following end match closes it. End tokens are
/// only considered once a begin token has been seen, so a stray end
/// line on its own never produces a range.
///
/// If the viewport closes while a block is still open, scanning
/// continues past the viewport until an end match or the end of the
/// document, so a block that starts in view but ends off-screen still
/// folds to its real extent.
pub fn scan<E: EditorSurface>(editor: &E, begin: &Regex, end: &Regex) -> Vec<BlockRange> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, String)> = None;

    let viewport = editor.viewport();
    let visible_end = viewport.end.min(editor.line_count());

    for i in viewport.start..visible_end {
        let Some(line) = editor.line(i) else { break };

        if let Some((from_line, begin_text)) = open.take() {
            if let Some(m) = end.find(line) {
                ranges.push(make_range(editor, from_line, i, begin_text, m.as_str()));
            } else {
                open = Some((from_line, begin_text));
            }
        } else if let Some(m) = begin.find(line) {
            open = Some((i, m.as_str().to_owned()));
        }
    }

    // A block opened in view but not closed by the viewport edge:
    // look ahead to the nearest end match or EOF.
    if let Some((from_line, begin_text)) = open {
        for i in visible_end..editor.line_count() {
            let Some(line) = editor.line(i) else { break };
            if let Some(m) = end.find(line) {
                ranges.push(make_range(editor, from_line, i, begin_text, m.as_str()));
                break;
            }
        }
    }

    ranges
}

fn make_range<E: EditorSurface>(
    editor: &E,
    from_line: usize,
    to_line: usize,
    begin_match: String,
    end_match: &str,
) -> BlockRange {
    let mut content_lines = Vec::new();
    for i in from_line + 1..to_line {
        if let Some(line) = editor.line(i) {
            content_lines.push(line.to_owned());
        }
    }
    BlockRange {
        from_line,
        to_line,
        begin_match,
        end_match: end_match.to_owned(),
        content: content_lines.join("\n"),
    }
}
