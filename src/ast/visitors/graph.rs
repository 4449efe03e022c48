//! Graph inventory and graph rewriting visitors.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::ast::query::Query;
use crate::ast::statement::{GroupBlock, ProjectionBlock, Statement};
use crate::ast::visit::{Visit, walk_group, walk_projection, walk_query};
use crate::ast::visit_mut::{self, VisitMut};

/// Collects every graph IRI named in a query: the outer dataset graph,
/// `FROM` clauses of SELECT / DESCRIBE blocks and `GRAPH` groups.
#[derive(Debug, Clone, Default)]
pub struct GraphCollector {
    graphs: BTreeSet<SmolStr>,
}

impl GraphCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect_query(query: &Query) -> BTreeSet<SmolStr> {
        let mut collector = Self::new();
        let _ = collector.visit_query(query);
        collector.graphs
    }

    pub fn graphs(&self) -> &BTreeSet<SmolStr> {
        &self.graphs
    }
}

impl Visit for GraphCollector {
    type Break = ();

    fn visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        self.graphs.extend(query.graph.clone());
        walk_query(self, query)
    }

    fn visit_group(&mut self, group: &GroupBlock) -> ControlFlow<Self::Break> {
        self.graphs.extend(group.graph.clone());
        walk_group(self, group)
    }

    fn visit_projection(&mut self, block: &ProjectionBlock) -> ControlFlow<Self::Break> {
        self.graphs.extend(block.graph.clone());
        walk_projection(self, block)
    }
}

#[derive(Debug, Clone)]
enum RewriteMode {
    /// Retarget every tagged node.
    All,
    /// Retarget only tags equal to this graph.
    Matching(SmolStr),
}

/// Retargets graph tags in a query tree.
///
/// The replacement is stored as `None` when the new graph is empty, so
/// rewriting to `""` strips the tags instead of producing `GRAPH <>`.
#[derive(Debug, Clone)]
pub struct GraphRewriter {
    mode: RewriteMode,
    new_graph: Option<SmolStr>,
}

impl GraphRewriter {
    /// Rewriter that sets every group, projection and the outer graph to `new_graph`.
    pub fn rewrite_all(new_graph: &str) -> Self {
        Self {
            mode: RewriteMode::All,
            new_graph: (!new_graph.is_empty()).then(|| SmolStr::new(new_graph)),
        }
    }

    /// Rewriter that only touches tags currently equal to `old_graph`.
    pub fn replace(old_graph: &str, new_graph: &str) -> Self {
        Self {
            mode: RewriteMode::Matching(SmolStr::new(old_graph)),
            new_graph: (!new_graph.is_empty()).then(|| SmolStr::new(new_graph)),
        }
    }

    pub fn rewrite_query(&mut self, query: &mut Query) {
        let _ = self.visit_query(query);
    }

    pub fn rewrite_statement(&mut self, statement: &mut Statement) {
        let _ = self.visit_statement(statement);
    }

    fn retarget(&self, graph: &mut Option<SmolStr>) {
        let matches = match &self.mode {
            RewriteMode::All => true,
            RewriteMode::Matching(old) => graph.as_ref() == Some(old),
        };
        if matches {
            *graph = self.new_graph.clone();
        }
    }
}

impl VisitMut for GraphRewriter {
    type Break = ();

    fn visit_query(&mut self, query: &mut Query) -> ControlFlow<Self::Break> {
        match &self.mode {
            RewriteMode::All => query.graph = self.new_graph.clone(),
            RewriteMode::Matching(_) => self.retarget(&mut query.graph),
        }
        visit_mut::walk_query(self, query)
    }

    fn visit_group(&mut self, group: &mut GroupBlock) -> ControlFlow<Self::Break> {
        self.retarget(&mut group.graph);
        visit_mut::walk_group(self, group)
    }

    fn visit_projection(&mut self, block: &mut ProjectionBlock) -> ControlFlow<Self::Break> {
        self.retarget(&mut block.graph);
        visit_mut::walk_projection(self, block)
    }
}
