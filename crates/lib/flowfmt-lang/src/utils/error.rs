use std::fmt;
use std::ops::Range;
use std::path::Path;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use chumsky::error::{Rich, RichPattern, RichReason};
use itertools::Itertools;

use crate::ast::NodeKind;
use crate::doc::Marker;

pub type Span = Range<usize>;

/// A dynamic error type that can hold specific error messages and the location where the error happened.
pub trait ReportableError: std::error::Error {
    /// message is used for reporting verbose message for `ariadne`.
    fn get_message(&self) -> String {
        self.to_string()
    }
    /// Byte ranges in the source, each with its own note. Errors raised after
    /// parsing have no source position and return an empty list.
    fn get_labels(&self) -> Vec<(Span, String)>;
}

/// How a document broke the scope discipline. Always a bug in a printing
/// rule, never a problem with the input program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeViolation {
    /// Scope still open when the document ended.
    Unclosed { scope: String },
    /// A close with no open scope, at the given leaf index.
    UnmatchedClose { position: usize },
    /// Close whose dedent mode disagrees with the indent mode of its open.
    MismatchedClose { scope: String },
    /// A conditional marker with no enclosing scope.
    MarkerOutsideScope { marker: Marker },
}

impl fmt::Display for ScopeViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScopeViolation::Unclosed { scope } => write!(f, "scope \"{scope}\" is never closed"),
            ScopeViolation::UnmatchedClose { position } => {
                write!(f, "scope close at document position {position} has no matching open")
            }
            ScopeViolation::MismatchedClose { scope } => write!(
                f,
                "scope \"{scope}\" is closed with a different indentation mode than it was opened with"
            ),
            ScopeViolation::MarkerOutsideScope { marker } => {
                write!(f, "marker {marker} is used outside of any scope")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    UnhandledNodeKind(NodeKind),
    UnbalancedScope(ScopeViolation),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::UnhandledNodeKind(kind) => {
                write!(f, "no printing rule is registered for node kind {kind}")
            }
            FormatError::UnbalancedScope(v) => write!(f, "internal error: unbalanced scope: {v}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl ReportableError for FormatError {
    fn get_labels(&self) -> Vec<(Span, String)> {
        vec![]
    }
}

impl From<ScopeViolation> for FormatError {
    fn from(v: ScopeViolation) -> Self {
        FormatError::UnbalancedScope(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

/// Quote a token once, and drop patterns that would print as nothing.
fn describe(pattern: &RichPattern<'_, char>) -> Option<String> {
    match pattern {
        RichPattern::Token(c) => Some(format!("'{}'", **c)),
        RichPattern::Label(l) if l.is_empty() => None,
        RichPattern::Label(l) => Some(l.to_string()),
        RichPattern::Identifier(i) if i.is_empty() => None,
        RichPattern::Identifier(i) => Some(format!("'{i}'")),
        RichPattern::Any => Some("any character".to_string()),
        RichPattern::SomethingElse => Some("something else".to_string()),
        RichPattern::EndOfInput => Some("end of input".to_string()),
    }
}

impl<'src> From<Rich<'src, char>> for ParseError {
    fn from(e: Rich<'src, char>) -> Self {
        let message = match e.reason() {
            RichReason::ExpectedFound { expected, found } => {
                let label = found
                    .as_ref()
                    .map_or_else(|| "end of input".to_string(), |found| format!("'{}'", **found));
                let expected_labels = expected.iter().filter_map(describe).unique().join(", ");
                format!("unexpected {label}, expected {expected_labels}")
            }
            RichReason::Custom(msg) => msg.clone(),
        };
        Self {
            message,
            span: e.span().start..e.span().end,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for ParseError {}
impl ReportableError for ParseError {
    fn get_labels(&self) -> Vec<(Span, String)> {
        vec![(self.span.clone(), self.message.clone())]
    }
}

pub fn report(src: &str, path: &Path, errs: &[Box<dyn ReportableError + '_>]) {
    let mut colors = ColorGenerator::new();
    let id = path.display().to_string();
    for e in errs {
        let rawlabels = e.get_labels();
        let labels = rawlabels.iter().map(|(span, message)| {
            Label::new((id.clone(), span.clone()))
                .with_message(message)
                .with_color(colors.next())
        });
        let head = rawlabels.first().map_or(0..0, |(span, _)| span.clone());
        let res = Report::build(ReportKind::Error, (id.clone(), head))
            .with_message(e.get_message())
            .with_labels(labels)
            .finish()
            .eprint((id.clone(), Source::from(src)));
        if let Err(io_err) = res {
            log::error!("failed to print diagnostic: {io_err}");
        }
    }
}

pub fn dump_to_string(errs: &[Box<dyn ReportableError + '_>]) -> String {
    errs.iter()
        .map(|e| e.get_message())
        .collect::<Vec<_>>()
        .join("\n")
}
