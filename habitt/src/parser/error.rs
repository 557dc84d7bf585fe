use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// Why a habit block failed to parse. Both variants collapse to the
/// same caller behavior: skip the table and render a raw-text
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `[month: …]` directive, or an empty month token.
    MissingMonth,
    /// The month token does not resolve to a calendar month.
    InvalidDate {
        token: String,
        /// Byte span of the token within the block source.
        span: Range<usize>,
    },
}

impl ParseError {
    /// Byte span within the block source, where one exists.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ParseError::MissingMonth => None,
            ParseError::InvalidDate { span, .. } => Some(span.clone()),
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(self.to_string());
        match self {
            ParseError::MissingMonth => diagnostic
                .with_notes(vec!["expected a month directive, e.g. [month: 2021-01]".to_owned()]),
            ParseError::InvalidDate { span, .. } => {
                diagnostic.with_labels(vec![Label::primary(file_id, span.clone())])
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingMonth => write!(f, "month not found, e.g. [month: 2021-01]"),
            ParseError::InvalidDate { token, .. } => write!(f, "invalid date: {}", token),
        }
    }
}

impl std::error::Error for ParseError {}
