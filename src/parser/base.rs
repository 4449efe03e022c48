//! Shared parser infrastructure for token stream navigation and error handling.
//!
//! [`TokenCursor`] owns the token stream for the duration of one parse. Line
//! breaks stay in the stream as marker tokens: the plain navigation methods
//! step over them (counting lines as they go), while the `*_including_newlines`
//! variants hand them out so opaque clause text keeps its original layout.

use crate::ast::Span;
use crate::error::ParseError;
use crate::lexer::token::{Token, TokenKind};

/// Common result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Text reported as `found` when the stream is exhausted.
pub const END_OF_INPUT: &str = "end of input";

/// Stateful cursor over a token stream.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    index: usize,
    line: usize,
    end: usize,
    context_tokens: usize,
}

impl TokenCursor {
    /// Creates a cursor at the start of `tokens`.
    ///
    /// `end` is the byte length of the source, used as the error position once
    /// the stream is exhausted.
    pub fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self {
            tokens,
            index: 0,
            line: 1,
            end,
            context_tokens: 5,
        }
    }

    /// Sets how many consumed tokens error messages quote.
    pub fn with_context_tokens(mut self, context_tokens: usize) -> Self {
        self.context_tokens = context_tokens;
        self
    }

    /// True if a token other than a line break remains.
    pub fn has_next(&self) -> bool {
        self.tokens[self.index..]
            .iter()
            .any(|token| !token.is_line_break())
    }

    /// True if any token remains, line breaks included.
    pub fn has_next_including_newlines(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Consumes and returns the next token, stepping over line breaks.
    pub fn next(&mut self) -> Option<Token> {
        loop {
            let token = self.next_including_newlines()?;
            if !token.is_line_break() {
                return Some(token);
            }
        }
    }

    /// Consumes and returns the next token, line breaks included.
    pub fn next_including_newlines(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index)?.clone();
        self.index += 1;
        if token.kind == TokenKind::Newline {
            self.line += 1;
        }
        Some(token)
    }

    /// Returns the next token other than a line break without consuming anything.
    pub fn peek_next(&self) -> Option<&Token> {
        self.peek_nth(0)
    }

    /// Returns the `n`-th upcoming token (0-based), skipping line breaks.
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens[self.index..]
            .iter()
            .filter(|token| !token.is_line_break())
            .nth(n)
    }

    /// Returns the next token, line breaks included, without consuming it.
    pub fn peek_next_including_newlines(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Consumes the next token, failing with `expected` at end of input.
    pub fn expect_next(&mut self, expected: &str) -> ParseResult<Token> {
        match self.next() {
            Some(token) => Ok(token),
            None => Err(self.error_at_end(expected)),
        }
    }

    /// Current 1-based line.
    pub fn current_line(&self) -> usize {
        self.line
    }

    /// The last `n` consumed tokens (line breaks excluded), space-joined.
    pub fn previous(&self, n: usize) -> String {
        let consumed = &self.tokens[..self.index];
        let mut recent: Vec<&str> = consumed
            .iter()
            .rev()
            .filter(|token| !token.is_line_break())
            .take(n)
            .map(Token::as_str)
            .collect();
        recent.reverse();
        recent.join(" ")
    }

    /// Replaces the most recently consumed token with `replacement`.
    ///
    /// The first replacement token counts as consumed; the rest are up next.
    pub fn replace_current(&mut self, replacement: Vec<Token>) {
        if self.index == 0 || replacement.is_empty() {
            return;
        }
        let at = self.index - 1;
        self.tokens.splice(at..=at, replacement);
    }

    /// Splits `prefix` off the most recently consumed token.
    ///
    /// Applies when that token starts with `prefix` (ASCII case-insensitive)
    /// and is longer than it, so a glued token such as `.?s` becomes `.`
    /// followed by `?s`. Returns whether a split happened.
    pub fn break_off(&mut self, prefix: &str) -> bool {
        let Some(current) = self.index.checked_sub(1).and_then(|at| self.tokens.get(at)) else {
            return false;
        };
        let glued = current.text.len() > prefix.len()
            && current
                .text
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if !glued {
            return false;
        }
        match current.split_at(prefix.len()) {
            Some((head, tail)) => {
                self.replace_current(vec![head, tail]);
                true
            }
            None => false,
        }
    }

    /// Error positioned at the upcoming token (or at end of input).
    pub fn error_found(&self, expected: &str) -> ParseError {
        match self.peek_next() {
            Some(token) => self.error_at(token, expected),
            None => self.error_at_end(expected),
        }
    }

    /// Error positioned at `token`, typically one that was just consumed.
    pub fn error_at(&self, token: &Token, expected: &str) -> ParseError {
        ParseError::new(
            self.line,
            expected,
            token.to_string(),
            self.previous(self.context_tokens),
            token.span.clone(),
        )
    }

    /// Error for running out of tokens while `expected` was still due.
    pub fn error_at_end(&self, expected: &str) -> ParseError {
        ParseError::new(
            self.line,
            expected,
            END_OF_INPUT,
            self.previous(self.context_tokens),
            self.end_span(),
        )
    }

    fn end_span(&self) -> Span {
        self.end..self.end
    }
}
