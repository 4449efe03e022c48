//! Token types and representations for SPARQL lexical analysis.

use crate::ast::Span;
use logos::Logos;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
///
/// The splitter only distinguishes what it must protect from splitting
/// (strings, IRI references) and the first-class structural markers. Every
/// other run of non-blank characters is a `Word`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\r\n]*")]
pub enum TokenKind {
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// A line feed; counted by the cursor to track line numbers.
    #[token("\n")]
    Newline,
    /// A carriage return; a line-break marker that does not advance the line.
    #[token("\r")]
    CarriageReturn,
    /// A double-quoted string including its quotes. May be unterminated at end of input.
    #[regex(r#""[^"]*"?"#)]
    StringLiteral,
    /// An angle-bracketed IRI including its delimiters. May be unterminated at end of input.
    #[regex(r"<[^>]*>?")]
    IriRef,
    /// Any other run of characters up to the next delimiter.
    #[regex(r#"[^ \t\r\n{}"<#]+"#)]
    Word,
}

impl TokenKind {
    /// Classifies a piece of token text produced by re-splitting an existing token.
    pub fn classify(text: &str) -> Self {
        match text {
            "{" => TokenKind::LBrace,
            "}" => TokenKind::RBrace,
            "\n" => TokenKind::Newline,
            "\r" => TokenKind::CarriageReturn,
            _ if text.starts_with('"') => TokenKind::StringLiteral,
            _ if text.starts_with('<') => TokenKind::IriRef,
            _ => TokenKind::Word,
        }
    }

    /// Returns true for the line-break markers (`\n` and `\r`).
    pub fn is_line_break(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::CarriageReturn)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::CarriageReturn => write!(f, "carriage return"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::IriRef => write!(f, "IRI reference"),
            TokenKind::Word => write!(f, "word"),
        }
    }
}

/// A lexical token: an immutable span of query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text exactly as it appears in the source.
    pub text: SmolStr,
    /// The span in source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns the token text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if this token is a `\n` or `\r` marker.
    pub fn is_line_break(&self) -> bool {
        self.kind.is_line_break()
    }

    /// Returns true if this is a complete `<...>` IRI reference.
    pub fn is_iri(&self) -> bool {
        self.text.len() >= 2 && self.text.starts_with('<') && self.text.ends_with('>')
    }

    /// Returns the IRI with its angle brackets removed, if this is an IRI reference.
    pub fn iri(&self) -> Option<&str> {
        if self.is_iri() {
            Some(&self.text[1..self.text.len() - 1])
        } else {
            None
        }
    }

    /// Splits this token after `at` bytes, producing two tokens with adjusted spans.
    ///
    /// Returns `None` when `at` is not a char boundary strictly inside the text.
    pub fn split_at(&self, at: usize) -> Option<(Token, Token)> {
        if at == 0 || at >= self.text.len() || !self.text.is_char_boundary(at) {
            return None;
        }
        let (head, tail) = self.text.split_at(at);
        let mid = (self.span.start + at).min(self.span.end);
        Some((
            Token::new(TokenKind::classify(head), head, self.span.start..mid),
            Token::new(TokenKind::classify(tail), tail, mid..self.span.end),
        ))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "\\n"),
            TokenKind::CarriageReturn => write!(f, "\\r"),
            _ => write!(f, "{}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_creation() {
        let token = Token::new(TokenKind::Word, "SELECT", 0..6);
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.as_str(), "SELECT");
        assert_eq!(token.span, 0..6);
    }

    #[test]
    fn classify_pieces() {
        assert_eq!(TokenKind::classify("{"), TokenKind::LBrace);
        assert_eq!(TokenKind::classify("}"), TokenKind::RBrace);
        assert_eq!(TokenKind::classify("\n"), TokenKind::Newline);
        assert_eq!(TokenKind::classify("<http://x>"), TokenKind::IriRef);
        assert_eq!(TokenKind::classify("\"lit\""), TokenKind::StringLiteral);
        assert_eq!(TokenKind::classify("graph"), TokenKind::Word);
    }

    #[test]
    fn iri_strips_delimiters() {
        let token = Token::new(TokenKind::IriRef, "<http://g>", 3..13);
        assert!(token.is_iri());
        assert_eq!(token.iri(), Some("http://g"));

        let unterminated = Token::new(TokenKind::IriRef, "<http://g", 0..9);
        assert!(!unterminated.is_iri());
        assert_eq!(unterminated.iri(), None);
    }

    #[test]
    fn split_adjusts_spans() {
        let token = Token::new(TokenKind::Word, "graph:x", 10..17);
        let (head, tail) = token.split_at(5).expect("split inside text");
        assert_eq!(head.as_str(), "graph");
        assert_eq!(head.span, 10..15);
        assert_eq!(tail.as_str(), ":x");
        assert_eq!(tail.span, 15..17);
    }

    #[test]
    fn split_rejects_edges() {
        let token = Token::new(TokenKind::Word, "where", 0..5);
        assert!(token.split_at(0).is_none());
        assert!(token.split_at(5).is_none());
    }

    #[test]
    fn line_break_display_is_escaped() {
        let token = Token::new(TokenKind::Newline, "\n", 0..1);
        assert!(token.is_line_break());
        assert_eq!(token.to_string(), "\\n");
    }
}
