//! Habit-tracker mini-language embedded in Markdown fenced code blocks.
//!
//! A ```` ```habitt ```` fence names a target month, an optional table
//! width, and a set of punched days:
//!
//! ```text
//! [month: 2021-02]
//! [width: 300px]
//! (1)(14,love)
//! ```
//!
//! The block renders as an HTML calendar table. Two front ends feed
//! the same parser and renderer: [`fence`] adapts a pulldown-cmark
//! event stream for static rendering, and [`live`] wires the
//! [`folding`] engine for in-editor fold/unfold rendering.

pub mod calendar;
pub mod dom;
pub mod fence;
pub mod live;
pub mod parser;
pub mod render;
pub mod settings;

pub use fence::{FENCE_TAG, HabitFences, render_block, render_document};
pub use parser::{HabitContext, ParseError, parse};
pub use render::render_table;
pub use settings::HabitSettings;
