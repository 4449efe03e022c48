//! Query tree: the top-level [`Query`] and its [`Statement`] nodes.

pub mod query;
mod render;
mod span;
pub mod statement;
pub mod visit;
mod visit_macros;
pub mod visit_mut;
pub mod visitors;

// Re-export span types
pub use span::Span;

// Re-export the query tree
pub use query::{Query, QueryType};
pub use statement::{
    AskBlock, ConstructBlock, DescribeBlock, GroupBlock, ProjectionBlock, SelectBlock,
    SelectModifier, SimpleStatement, Statement, StatementKind, UpdateBlock, UpdateOperation,
    WhereBlock, extract_variables,
};
