//! Group bodies: the `{ .. }` scanning loop shared by every block form.

use smol_str::SmolStr;

use crate::ast::{GroupBlock, SimpleStatement, Statement};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

/// How a body treats a `.` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyStyle {
    /// Each `.` closes the current fragment (plain groups, WHERE, ASK).
    Segmented,
    /// `.` is ordinary text (query-form WHERE bodies, update templates).
    Opaque,
}

impl Parser<'_> {
    /// Scans a body up to and including its closing `}`.
    ///
    /// The opening `{` must already be consumed. Text between nested blocks
    /// accumulates into [`SimpleStatement`]s; `{`, `GRAPH` and `OPTIONAL` start
    /// a nested [`GroupBlock`] and `{ SELECT` a sub-select. Nesting past
    /// `max_depth` is an error.
    pub(crate) fn parse_body(&mut self, style: BodyStyle) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        let mut fragment = String::new();

        while let Some(token) = self.cursor.peek_next() {
            if token.kind == TokenKind::RBrace {
                self.cursor.next();
                flush(&mut fragment, &mut statements);
                return Ok(statements);
            }

            let opens_group = token.kind == TokenKind::LBrace
                || Keyword::Graph.starts(token.as_str())
                || Keyword::Optional.starts(token.as_str());
            if opens_group {
                flush(&mut fragment, &mut statements);
                let sub_select = token.kind == TokenKind::LBrace
                    && self
                        .cursor
                        .peek_nth(1)
                        .is_some_and(|next| Keyword::Select.is(next.as_str()));
                if self.depth >= self.config.max_depth {
                    return Err(self
                        .cursor
                        .error_found(&format!(
                            "expected at most {} nested groups",
                            self.config.max_depth
                        ))
                        .with_help("raise `ParserConfig::max_depth` to accept deeper nesting"));
                }
                self.depth += 1;
                let nested = if sub_select {
                    self.cursor.next();
                    self.cursor.next();
                    self.parse_projection_form(true)
                        .map(|block| Statement::Select(Box::new(block)))
                } else {
                    self.parse_group().map(Statement::Group)
                };
                self.depth -= 1;
                statements.push(nested?);
                continue;
            }

            if style == BodyStyle::Segmented && token.as_str().starts_with('.') {
                self.cursor.next();
                self.cursor.break_off(".");
                if !fragment.trim().is_empty() {
                    fragment.push_str(" .");
                }
                flush(&mut fragment, &mut statements);
                continue;
            }

            // Keep line breaks so multi-line fragments render as written.
            while let Some(part) = self.cursor.next_including_newlines() {
                if part.is_line_break() {
                    fragment.push_str(part.as_str());
                } else {
                    fragment.push(' ');
                    fragment.push_str(part.as_str());
                    break;
                }
            }
        }

        while self.cursor.next_including_newlines().is_some() {}
        Err(self.cursor.error_at_end("expected '}'"))
    }

    /// Parses a nested group: `{ .. }`, `GRAPH <iri> { .. }` or `OPTIONAL { .. }`.
    pub(crate) fn parse_group(&mut self) -> ParseResult<GroupBlock> {
        let mut group = GroupBlock::default();
        if self.eat_keyword_glued(Keyword::Optional) {
            group.optional = true;
        } else if self.eat_keyword_glued(Keyword::Graph) {
            group.graph = Some(self.expect_iri()?);
        }
        let line = self.cursor.current_line();
        self.expect_open_brace()?;
        group.statements = self.parse_body(BodyStyle::Segmented)?;
        tracing::trace!(
            line,
            graph = group.graph.as_deref(),
            optional = group.optional,
            "parsed group"
        );
        Ok(group)
    }

    /// Consumes a `{`.
    pub(crate) fn expect_open_brace(&mut self) -> ParseResult<()> {
        let token = self.cursor.expect_next("expected '{'")?;
        if token.kind == TokenKind::LBrace {
            Ok(())
        } else {
            Err(self.cursor.error_at(&token, "expected '{'"))
        }
    }

    /// Consumes an `<iri>` and returns it without the angle brackets.
    pub(crate) fn expect_iri(&mut self) -> ParseResult<SmolStr> {
        let token = self.cursor.expect_next("expected '<iri>'")?;
        match token.iri() {
            Some(iri) => Ok(SmolStr::new(iri)),
            None => Err(self
                .cursor
                .error_at(&token, "expected '<iri>'")
                .with_help("graph and prefix IRIs must be written in full as <...>")),
        }
    }

    /// Consumes the next token if it is exactly `keyword`.
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self
            .cursor
            .peek_next()
            .is_some_and(|token| keyword.is(token.as_str()));
        if matched {
            self.cursor.next();
        }
        matched
    }

    /// Consumes `keyword`, also when glued to a following `<`, `{` or `(`.
    ///
    /// The glued remainder is split off and left as the next token.
    pub(crate) fn eat_keyword_glued(&mut self, keyword: Keyword) -> bool {
        let matched = self
            .cursor
            .peek_next()
            .is_some_and(|token| keyword.starts(token.as_str()));
        if matched {
            self.cursor.next();
            self.cursor.break_off(keyword.as_str());
        }
        matched
    }
}

fn flush(fragment: &mut String, statements: &mut Vec<Statement>) {
    if !fragment.trim().is_empty() {
        statements.push(Statement::Simple(SimpleStatement::new(fragment.as_str())));
    }
    fragment.clear();
}
