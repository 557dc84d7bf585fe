//! Live front end: the folding engine wired for habit blocks.
//!
//! Mirrors the static front end but renders into an editor widget:
//! the region between a ```` ```habitt ```` line and the next fence
//! line folds behind a placeholder, with the calendar table attached
//! below. A block that fails to parse renders its raw content as plain
//! text so the fold is still usable.

use std::sync::LazyLock;

use folding::{FoldEngine, FoldOptions};
use regex::Regex;

use crate::dom::Element;
use crate::parser;
use crate::render;
use crate::settings::HabitSettings;

/// Class stamped on the engine's text markers.
pub const MARKER_CLASS: &str = "habit-tracker-marker";

/// Placeholder shown in place of the folded block.
pub const FOLDED_TEXT: &str = "===> Folded Habit Tracker Block <===";

static BEGIN_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*```habitt").unwrap());
static END_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*```").unwrap());

/// Build a fold engine for habit blocks. The host owns the engine,
/// forwards caret/viewport events to [`FoldEngine::notify`], and
/// drives [`FoldEngine::tick`] from its timer.
pub fn habit_fold_engine(settings: HabitSettings) -> FoldEngine {
    let renderer = Box::new(move |_begin: &str, _end: &str, content: &str| {
        match parser::parse(content, &settings) {
            Ok(ctx) => render::render_table(&ctx, &settings).to_html(),
            Err(_) => Element::new("div").text(content).to_html(),
        }
    });

    FoldEngine::new(
        BEGIN_TOKEN.clone(),
        END_TOKEN.clone(),
        renderer,
        FoldOptions {
            marker_class: MARKER_CLASS.to_owned(),
            folded_text: FOLDED_TEXT.to_owned(),
            clear_on_click: true,
            code_block: true,
            ..FoldOptions::default()
        },
    )
}
