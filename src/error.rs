//! Parse failure type.
//!
//! Every structural problem in a query is reported as one [`ParseError`] of
//! kind [`ErrorKind::InvalidQuery`]. There is no partial result: a parse
//! either yields a complete tree or this error.

use crate::ast::Span;
use crate::diag::{Diag, SourceFile, convert_diag_to_report};
use miette::{Diagnostic, LabeledSpan, Report};
use smol_str::SmolStr;
use std::fmt;

/// Diagnostic code attached to every parse failure.
pub const INVALID_QUERY_CODE: &str = "sparql::invalid_query";

/// Classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text is not a query this parser understands.
    InvalidQuery,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidQuery => write!(f, "invalid query"),
        }
    }
}

/// A failed parse, positioned at the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    expected: SmolStr,
    found: String,
    near: String,
    span: Span,
    help: Option<String>,
}

impl ParseError {
    /// Creates an error.
    ///
    /// `expected` is a fixed description such as `expected '{'`; `found` is the
    /// offending token text (or `end of input`); `near` is the recently
    /// consumed context.
    pub fn new(
        line: usize,
        expected: impl Into<SmolStr>,
        found: impl Into<String>,
        near: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            line,
            expected: expected.into(),
            found: found.into(),
            near: near.into(),
            span,
            help: None,
        }
    }

    /// Attaches a hint on how to fix the query.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Always [`ErrorKind::InvalidQuery`].
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidQuery
    }

    /// 1-based line of the failure.
    pub fn line(&self) -> usize {
        self.line
    }

    /// What the parser expected at this point.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// The token that was found instead.
    pub fn found(&self) -> &str {
        &self.found
    }

    /// Space-joined tokens consumed right before the failure.
    pub fn near(&self) -> &str {
        &self.near
    }

    /// Byte range of the offending token in the query text.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Returns the fix-up hint, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Converts this error into the shared diagnostic model.
    pub fn to_diag(&self) -> Diag {
        let mut diag = Diag::error(format!("{}, found {}", self.expected, self.found))
            .with_label(self.span.clone(), format!("line {}", self.line))
            .with_code(INVALID_QUERY_CODE);
        if !self.near.is_empty() {
            diag = diag.with_note(format!("near: {}", self.near));
        }
        if let Some(help) = &self.help {
            diag = diag.with_help(help.clone());
        }
        diag
    }

    /// Renders this error as a `miette` report over `source`.
    pub fn to_report(&self, source: &SourceFile) -> Report {
        convert_diag_to_report(&self.to_diag(), source)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid SPARQL on line {}: {}, found {} (near: {})",
            self.line, self.expected, self.found, self.near
        )
    }
}

impl std::error::Error for ParseError {}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(INVALID_QUERY_CODE))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(
            Some(self.expected.to_string()),
            (self.span.start, self.span.end.saturating_sub(self.span.start)),
        );
        Some(Box::new(std::iter::once(label)))
    }
}
