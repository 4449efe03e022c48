//! Recursive-descent parser for SPARQL structure.
//!
//! The parser walks the token stream produced by the lexer and builds a
//! [`Query`] tree. It models the prologue, the query forms, update templates
//! and nested groups; clause bodies in between stay opaque text. The first
//! structural problem aborts the parse with a [`ParseError`].

pub mod base;
mod group;
mod program;
mod query;
mod update;

use crate::ast::Query;
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::lexer::tokenize;
use base::TokenCursor;

/// SPARQL structural parser.
pub struct Parser<'source> {
    source: &'source str,
    cursor: TokenCursor,
    config: ParserConfig,
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Creates a parser over `source` with the default configuration.
    pub fn new(source: &'source str) -> Self {
        let config = ParserConfig::default();
        let cursor = TokenCursor::new(tokenize(source), source.len())
            .with_context_tokens(config.context_tokens);
        Self {
            source,
            cursor,
            config,
            depth: 0,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.cursor = self.cursor.with_context_tokens(config.context_tokens);
        self.config = config;
        self
    }

    /// Parses the whole input into a query.
    pub fn parse(mut self) -> Result<Query, ParseError> {
        tracing::debug!(bytes = self.source.len(), "parsing SPARQL query");
        match self.parse_query() {
            Ok(query) => {
                tracing::debug!(
                    query_type = %query.query_type(),
                    statements = query.statements().len(),
                    "parsed SPARQL query"
                );
                Ok(query)
            }
            Err(err) => {
                tracing::debug!(line = err.line(), expected = err.expected(), "SPARQL parse failed");
                Err(err)
            }
        }
    }
}
