//! Query forms: SELECT, DESCRIBE and CONSTRUCT, plus solution modifiers.

use crate::ast::{ConstructBlock, ProjectionBlock, SelectModifier};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::group::BodyStyle;

impl Parser<'_> {
    /// Parses a SELECT or DESCRIBE form after its keyword.
    ///
    /// Grammar: `[DISTINCT|REDUCED] projection [FROM [NAMED] <iri>] [WHERE] { body } modifiers`.
    /// A sub-select (`in_block`) also consumes its closing `}`.
    pub(crate) fn parse_projection_form(&mut self, in_block: bool) -> ParseResult<ProjectionBlock> {
        let mut block = ProjectionBlock {
            in_block,
            ..ProjectionBlock::default()
        };

        if self.eat_keyword(Keyword::Distinct) {
            block.modifier = Some(SelectModifier::Distinct);
        } else if self.eat_keyword(Keyword::Reduced) {
            block.modifier = Some(SelectModifier::Reduced);
        }

        let mut projection = Vec::new();
        while let Some(token) = self.cursor.peek_next() {
            if matches!(token.kind, TokenKind::LBrace | TokenKind::RBrace)
                || Keyword::From.is(token.as_str())
                || Keyword::Where.starts(token.as_str())
            {
                break;
            }
            projection.push(token.text.clone());
            self.cursor.next();
        }
        if projection.is_empty() {
            return Err(self.cursor.error_found("expected projection variables or '*'"));
        }
        block.projection = projection.join(" ");

        if self.eat_keyword(Keyword::From) {
            block.from_named = self.eat_keyword(Keyword::Named);
            block.graph = Some(self.expect_iri()?);
        }

        let has_where = self.eat_keyword_glued(Keyword::Where);
        let opens_body = self
            .cursor
            .peek_next()
            .is_some_and(|token| token.kind == TokenKind::LBrace);
        if !has_where && !opens_body {
            let expected = if block.graph.is_some() {
                "expected 'WHERE'"
            } else {
                "expected 'WHERE' or 'FROM'"
            };
            return Err(self.cursor.error_found(expected));
        }
        self.expect_open_brace()?;
        block.statements = self.parse_body(BodyStyle::Opaque)?;
        block.solution_modifiers = self.parse_solution_modifiers()?;

        if in_block {
            let token = self.cursor.expect_next("expected '}' after sub-select")?;
            if token.kind != TokenKind::RBrace {
                return Err(self.cursor.error_at(&token, "expected '}' after sub-select"));
            }
        }
        Ok(block)
    }

    /// Parses a CONSTRUCT form after its keyword.
    ///
    /// Grammar: `{ template } [WHERE] { body } modifiers`. No dataset clause is
    /// accepted between the template and the body.
    pub(crate) fn parse_construct(&mut self) -> ParseResult<ConstructBlock> {
        self.expect_open_brace()?;

        let mut template = String::new();
        loop {
            let Some(token) = self.cursor.next_including_newlines() else {
                return Err(self.cursor.error_at_end("expected '}'"));
            };
            match token.kind {
                TokenKind::RBrace => break,
                kind if kind.is_line_break() => template.push_str(token.as_str()),
                _ => {
                    template.push(' ');
                    template.push_str(token.as_str());
                }
            }
        }

        self.eat_keyword_glued(Keyword::Where);
        self.expect_open_brace()?;
        let statements = self.parse_body(BodyStyle::Opaque)?;
        let solution_modifiers = self.parse_solution_modifiers()?;

        Ok(ConstructBlock {
            template: template.trim().to_string(),
            statements,
            solution_modifiers,
        })
    }

    /// Parses trailing `LIMIT n`, `OFFSET n`, `ORDER BY key` and `GROUP BY ?var` clauses.
    ///
    /// Each clause is stored as text. Only a single ordering key or grouping
    /// variable is taken; anything else ends the list.
    pub(crate) fn parse_solution_modifiers(&mut self) -> ParseResult<Vec<String>> {
        let mut modifiers = Vec::new();
        while let Some(token) = self.cursor.peek_next() {
            let text = token.as_str();
            if Keyword::Limit.is(text) || Keyword::Offset.is(text) {
                let keyword = self.cursor.expect_next("expected a solution modifier")?;
                let value = self
                    .cursor
                    .expect_next(&format!("expected a value after {}", keyword.as_str()))?;
                modifiers.push(format!("{} {}", keyword.as_str(), value.as_str()));
            } else if Keyword::Group.is(text) {
                let group = self.cursor.expect_next("expected 'GROUP'")?;
                let by = self.cursor.expect_next("expected 'BY'")?;
                if !Keyword::By.is(by.as_str()) {
                    return Err(self.cursor.error_at(&by, "expected 'BY'"));
                }
                let variable = self.cursor.expect_next("expected a grouping variable")?;
                if !variable.as_str().starts_with('?') {
                    return Err(self.cursor.error_at(&variable, "expected a grouping variable"));
                }
                modifiers.push(format!(
                    "{} {} {}",
                    group.as_str(),
                    by.as_str(),
                    variable.as_str()
                ));
            } else if Keyword::Order.is(text) {
                let order = self.cursor.expect_next("expected 'order by'")?;
                let by = self.cursor.expect_next("expected 'order by'")?;
                if !Keyword::By.is(by.as_str()) {
                    return Err(self.cursor.error_at(&by, "expected 'order by'"));
                }
                let key = self.cursor.expect_next("expected an ordering key")?;
                modifiers.push(format!("{} {} {}", order.as_str(), by.as_str(), key.as_str()));
            } else {
                break;
            }
        }
        Ok(modifiers)
    }
}
