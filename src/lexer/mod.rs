//! Lexical splitting for SPARQL.
//!
//! The splitter turns raw query text into an ordered token stream. It never
//! fails: strings, IRI references and comments left open at end of input
//! simply end there.
//!
//! Splitting rules:
//! - spaces and tabs separate tokens and are dropped;
//! - `{`, `}`, `\n` and `\r` are emitted as tokens of their own, so group
//!   boundaries and line breaks stay visible to the parser;
//! - `"..."` and `<...>` are kept whole, whatever they contain;
//! - `#` starts a comment that runs up to (not including) the next line break.

pub mod keywords;
pub mod token;

use logos::Logos;
use token::{Token, TokenKind};

/// Splits query text into tokens.
///
/// This is the main entry point for lexical analysis.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        // Every character is covered by a rule; keep anything unexpected as text.
        let kind = result.unwrap_or(TokenKind::Word);
        let text = match kind {
            TokenKind::StringLiteral | TokenKind::IriRef => lexer.slice().trim_end(),
            _ => lexer.slice(),
        };
        if text.is_empty() {
            continue;
        }
        tokens.push(Token::new(kind, text, span.start..span.start + text.len()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .into_iter()
            .map(|token| token.text.to_string())
            .collect()
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn whitespace_only() {
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn splits_on_spaces_and_tabs() {
        assert_eq!(texts("SELECT ?x\t?y"), vec!["SELECT", "?x", "?y"]);
    }

    #[test]
    fn braces_and_line_breaks_are_tokens() {
        assert_eq!(
            texts("WHERE{?s ?p ?o}\n"),
            vec!["WHERE", "{", "?s", "?p", "?o", "}", "\n"]
        );
        assert_eq!(texts("a\r\nb"), vec!["a", "\r", "\n", "b"]);
    }

    #[test]
    fn strings_are_protected() {
        assert_eq!(
            texts(r#"?s ?p "hello { world } # not a comment""#),
            vec!["?s", "?p", r#""hello { world } # not a comment""#]
        );
    }

    #[test]
    fn iris_are_protected() {
        assert_eq!(
            texts("GRAPH<http://example.org/g#x> {"),
            vec!["GRAPH", "<http://example.org/g#x>", "{"]
        );
    }

    #[test]
    fn quote_and_angle_flush_the_buffer() {
        assert_eq!(texts(r#"foo"bar"baz"#), vec!["foo", r#""bar""#, "baz"]);
        assert_eq!(texts("a<b>c"), vec!["a", "<b>", "c"]);
    }

    #[test]
    fn comments_are_dropped_but_keep_the_line_break() {
        assert_eq!(
            texts("SELECT # pick things\n?x"),
            vec!["SELECT", "\n", "?x"]
        );
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let tokens = tokenize("?s \"open string  ");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[1].as_str(), "\"open string");
    }

    #[test]
    fn unterminated_iri_runs_to_end() {
        let tokens = tokenize("FROM <http://g");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::IriRef);
        assert!(!tokens[1].is_iri());
    }

    #[test]
    fn spans_point_into_source() {
        let source = "ASK { ?s ?p \"é\" }";
        for token in tokenize(source) {
            assert_eq!(&source[token.span.clone()], token.as_str());
        }
    }

    #[test]
    fn greater_than_outside_iri_is_text() {
        assert_eq!(texts("FILTER(?x>3)"), vec!["FILTER(?x>3)"]);
    }
}
