//! Immutable query-tree visitor infrastructure.

use std::ops::ControlFlow;

use crate::ast::query::Query;
use crate::ast::statement::{
    AskBlock, ConstructBlock, GroupBlock, ProjectionBlock, SimpleStatement, Statement,
    UpdateBlock, WhereBlock,
};

use super::visit_macros::define_visit_api;

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

define_visit_api!(Visit, [&]);
