//! Ready-to-use query-tree visitors.

pub mod graph;
pub mod variable;

pub use graph::{GraphCollector, GraphRewriter};
pub use variable::VariableCollector;
