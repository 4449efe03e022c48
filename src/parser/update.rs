//! Update grammar: `INSERT`/`DELETE` templates with an optional WHERE body.

use crate::ast::{Statement, UpdateBlock, UpdateOperation, WhereBlock};
use crate::lexer::keywords::Keyword;
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::group::BodyStyle;

impl Parser<'_> {
    /// Parses an update template after its INSERT or DELETE keyword.
    ///
    /// A WHERE clause that directly follows the template is attached to it,
    /// with or without `DATA`.
    pub(crate) fn parse_update(&mut self, keyword: Keyword) -> ParseResult<UpdateBlock> {
        let operation = match keyword {
            Keyword::Insert => UpdateOperation::Insert,
            _ => UpdateOperation::Delete,
        };
        let line = self.cursor.current_line();

        let data = self.eat_keyword_glued(Keyword::Data);
        self.expect_open_brace()?;
        let statements = self.parse_body(BodyStyle::Opaque)?;
        let mut block = UpdateBlock::new(operation, statements);
        block.data = data;

        let where_follows = self
            .cursor
            .peek_next()
            .is_some_and(|token| Keyword::Where.starts(token.as_str()));

        if self.config.strict_update_where && !data && !where_follows && uses_variables(&block) {
            let chained = self.cursor.peek_next().is_some_and(|token| {
                Keyword::Insert.is(token.as_str()) || Keyword::Delete.is(token.as_str())
            });
            if !chained {
                return Err(self
                    .cursor
                    .error_found(&format!("expected WHERE clause after the {operation} template"))
                    .with_help("templates that use variables need a WHERE clause to bind them"));
            }
        }

        if where_follows {
            self.eat_keyword_glued(Keyword::Where);
            self.expect_open_brace()?;
            let body = self.parse_body(BodyStyle::Segmented)?;
            block = block.with_where(WhereBlock::new(body));
        }

        tracing::trace!(
            line,
            %operation,
            data,
            has_where = block.where_block.is_some(),
            "parsed update template"
        );
        Ok(block)
    }
}

fn uses_variables(block: &UpdateBlock) -> bool {
    block
        .statements
        .iter()
        .any(|statement| !Statement::unknowns(statement).is_empty())
}
