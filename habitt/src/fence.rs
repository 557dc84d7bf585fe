//! Static front end: a pulldown-cmark event-stream adapter.
//!
//! Fences tagged [`FENCE_TAG`] are swallowed and replaced by one
//! `Event::Html` carrying the rendered table; every other event passes
//! through untouched, so this composes with further adapters by
//! stacking iterators.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::dom::Element;
use crate::parser;
use crate::render;
use crate::settings::HabitSettings;

/// Info string that marks a habit block fence. Matched exactly, so a
/// fence tagged `habitt foo` is left to the default renderer.
pub const FENCE_TAG: &str = "habitt";

/// Iterator adapter replacing `habitt` fences in a pulldown-cmark
/// event stream.
pub struct HabitFences<'s, I> {
    inner: I,
    settings: &'s HabitSettings,
}

impl<'s, I> HabitFences<'s, I> {
    pub fn new(inner: I, settings: &'s HabitSettings) -> Self {
        HabitFences { inner, settings }
    }
}

impl<'a, I> Iterator for HabitFences<'_, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        let event = self.inner.next()?;

        let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = &event else {
            return Some(event);
        };
        if info.as_ref() != FENCE_TAG {
            return Some(event);
        }

        // Swallow the fence body up to its closing tag.
        let mut source = String::new();
        for inner_event in self.inner.by_ref() {
            match inner_event {
                Event::Text(text) => source.push_str(&text),
                Event::End(TagEnd::CodeBlock) => break,
                _ => {}
            }
        }

        Some(Event::Html(CowStr::from(render_block(
            &source,
            self.settings,
        ))))
    }
}

/// Render one habit block body to markup. A block that fails to parse
/// falls back to its escaped raw source, so the reader still sees the
/// block text rather than nothing.
pub fn render_block(source: &str, settings: &HabitSettings) -> String {
    match parser::parse(source, settings) {
        Ok(ctx) => render::render_table(&ctx, settings).to_html(),
        Err(_) => Element::new("pre")
            .class("habitt-fallback")
            .child(Element::new("code").text(source))
            .to_html(),
    }
}

/// Render a whole Markdown document to HTML with habit fences
/// substituted.
pub fn render_document(source: &str, settings: &HabitSettings) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let events = HabitFences::new(Parser::new_ext(source, options), settings);
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}
