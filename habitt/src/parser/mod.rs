pub mod error;

pub use error::ParseError;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::format::StrftimeItems;
use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;

use crate::settings::HabitSettings;

static MONTH_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[month:\s*(\S*?)\s*\]").unwrap());
static WIDTH_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[width:\s*(\S*?)\s*\]").unwrap());
static PUNCH_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d+)(?:,([^)]*))?\)").unwrap());

/// Everything the renderer needs, derived once per render call from
/// the block source and settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitContext {
    /// First display column of the week, 0 = Sunday.
    pub start_of_week: u32,
    /// Weekday of day 1 of the target month, 0 = Sunday.
    pub start_day: u32,
    /// Number of days in the target month.
    pub month_days: u32,
    /// The month formatted per `month_format`.
    pub display_month: String,
    /// Verbatim CSS length from the width directive, unvalidated.
    pub table_width: Option<String>,
    /// Punched day → optional tag. None means the default glyph.
    /// Days outside `1..=month_days` are tolerated and never rendered.
    pub marks: HashMap<u32, Option<String>>,
}

/// Parse a habit block body.
///
/// Directives and punch groups are free-form and order-insensitive.
/// Malformed punch groups are skipped; only a missing month directive
/// or an unresolvable month token fails the block.
pub fn parse(source: &str, settings: &HabitSettings) -> Result<HabitContext, ParseError> {
    let token_match = MONTH_DIRECTIVE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or(ParseError::MissingMonth)?;
    let token = token_match.as_str();
    if token.is_empty() {
        return Err(ParseError::MissingMonth);
    }

    let invalid = || ParseError::InvalidDate {
        token: token.to_owned(),
        span: token_match.range(),
    };

    let first = resolve_month(token).ok_or_else(invalid)?;
    let month_days = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .ok_or_else(invalid)?;

    let table_width = WIDTH_DIRECTIVE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|w| !w.is_empty())
        .map(str::to_owned);

    let mut marks = HashMap::new();
    for caps in PUNCH_GROUP.captures_iter(source) {
        let Ok(day) = caps[1].parse::<u32>() else {
            continue;
        };
        // An empty tag means "use the default glyph", same as no tag.
        let tag = caps
            .get(2)
            .map(|m| m.as_str().to_owned())
            .filter(|t| !t.is_empty());
        marks.insert(day, tag);
    }

    Ok(HabitContext {
        start_of_week: u32::from(settings.start_of_week % 7),
        start_day: first.weekday().num_days_from_sunday(),
        month_days,
        display_month: format_month(first, &settings.month_format),
        table_width,
        marks,
    })
}

/// Resolve a month token at year-month granularity.
///
/// Accepts `YYYY`, `YYYY-MM` and `YYYY-MM-DD` with `-`, `/` or `.`
/// separators; a trailing day component is ignored, a bare year
/// resolves to January.
fn resolve_month(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split(['-', '/', '.']);
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(part) => part.parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Format the month title. A format string that does not parse, or
/// that needs fields a date cannot supply, falls back to the default
/// rather than failing the whole block.
fn format_month(first: NaiveDate, format: &str) -> String {
    let fallback = |first: NaiveDate| first.format("%Y-%m").to_string();

    let Ok(items) = StrftimeItems::new(format).parse() else {
        return fallback(first);
    };
    let mut out = String::new();
    if write!(out, "{}", first.format_with_items(items.iter())).is_err() {
        return fallback(first);
    }
    out
}
