//! SPARQL structural parser and graph rewriter.
//!
//! This library splits a SPARQL query or update into a lightweight tree that
//! models its structure (prologue, query form, nested groups, GRAPH and
//! OPTIONAL tags, update templates) while keeping clause bodies as opaque
//! text. The tree can report the variables it references, retarget its
//! graph IRIs and render itself back to SPARQL. Parse failures carry the
//! offending line and token and convert to miette reports.
//!
//! # Example
//!
//! ```
//! use sparql_parser::{QueryType, parse};
//!
//! let source = "SELECT ?s WHERE { GRAPH <http://old> { ?s ?p ?o } }";
//! let mut query = parse(source).expect("query parses");
//!
//! assert_eq!(query.query_type(), QueryType::Select);
//! assert!(query.unknown_variables().contains("o"));
//!
//! query.rewrite_graph("http://new");
//! let rendered = query.serialize();
//! assert!(rendered.contains("GRAPH <http://new>"));
//! assert!(!rendered.contains("http://old"));
//! ```

pub mod ast;
pub mod config;
pub mod diag;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export the query tree.
pub use ast::{
    AskBlock, ConstructBlock, DescribeBlock, GroupBlock, ProjectionBlock, Query, QueryType,
    SelectBlock, SelectModifier, SimpleStatement, Span, Statement, StatementKind, UpdateBlock,
    UpdateOperation, WhereBlock,
};

// Re-export configuration and error types.
pub use config::ParserConfig;
pub use diag::{Diag, DiagLabel, SourceFile};
pub use error::{ErrorKind, ParseError};

// Re-export lexer types for convenience.
pub use lexer::token::{Token, TokenKind};
pub use lexer::tokenize;
pub use parser::Parser;

/// Parses `text` with the default configuration.
pub fn parse(text: &str) -> Result<Query, ParseError> {
    Parser::new(text).parse()
}

/// Parses `text` with an explicit configuration.
pub fn parse_with_config(text: &str, config: ParserConfig) -> Result<Query, ParseError> {
    Parser::new(text).with_config(config).parse()
}
