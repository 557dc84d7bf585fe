//! Calendar table construction, following the `habitt-*` class
//! contract the bundled stylesheet targets.

use crate::calendar::{self, Week};
use crate::dom::Element;
use crate::parser::HabitContext;
use crate::settings::HabitSettings;

/// Shown for punched days that carry no tag.
pub const DEFAULT_GLYPH: &str = "✔️";

/// Render a parsed block as `div.habitt-div > table.habitt`.
pub fn render_table(ctx: &HabitContext, settings: &HabitSettings) -> Element {
    let mut table = Element::new("table").class("habitt");
    if let Some(width) = &ctx.table_width {
        table = table.attr("style", &format!("width: {width};"));
    }
    table = table
        .child(render_head(ctx, settings))
        .child(render_body(ctx, settings));
    Element::new("div").class("habitt-div").child(table)
}

fn render_head(ctx: &HabitContext, settings: &HabitSettings) -> Element {
    let mut thead = Element::new("thead");
    if settings.display_head {
        thead.push(
            Element::new("tr").child(
                Element::new("th")
                    .class("habitt-head")
                    .attr("colspan", "7")
                    .text(&ctx.display_month),
            ),
        );
    }
    let mut labels = Element::new("tr");
    for i in 0..7u32 {
        labels.push(
            Element::new("th")
                .class("habitt-th")
                .class(&format!("habitt-th-{i}"))
                .text(settings.week_label((i + ctx.start_of_week) % 7)),
        );
    }
    thead.push(labels);
    thead
}

fn render_body(ctx: &HabitContext, settings: &HabitSettings) -> Element {
    let mut tbody = Element::new("tbody");
    for week in calendar::layout(ctx.start_day, ctx.start_of_week, ctx.month_days) {
        tbody.push(render_week(&week, ctx, settings));
    }
    tbody
}

fn render_week(week: &Week, ctx: &HabitContext, settings: &HabitSettings) -> Element {
    let mut tr = Element::new("tr");
    for cell in week {
        tr.push(render_cell(*cell, ctx, settings));
    }
    tr
}

fn render_cell(day: Option<u32>, ctx: &HabitContext, settings: &HabitSettings) -> Element {
    let checked = day.is_some_and(|d| ctx.marks.contains_key(&d));

    let day_class = match day {
        Some(d) => format!("habitt-td--{d}"),
        None => "habitt-td--disabled".to_owned(),
    };
    let mut td = Element::new("td").class("habitt-td").class(&day_class);
    if checked {
        td = td.class("habitt-td--checked");
    }

    let date_text = day.map(|d| d.to_string()).unwrap_or_default();

    let mut dots = Element::new("div").class("habitt-dots");
    if checked {
        let tag = day
            .and_then(|d| ctx.marks.get(&d))
            .and_then(Clone::clone)
            .unwrap_or_else(|| DEFAULT_GLYPH.to_owned());
        if settings.enable_html {
            dots = dots.raw(format!("<div>{tag}</div>"));
        } else {
            dots = dots.child(Element::new("div").text(&tag));
        }
    }

    td.child(
        Element::new("div")
            .class("habitt-c")
            .child(Element::new("div").class("habitt-date").text(&date_text))
            .child(dots),
    )
}
