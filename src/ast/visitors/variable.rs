//! Variable collection visitor.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::ast::query::Query;
use crate::ast::statement::{
    ConstructBlock, ProjectionBlock, SimpleStatement, Statement, extract_variables,
};
use crate::ast::visit::{Visit, walk_construct, walk_projection};

/// Collects every variable referenced in a query tree.
///
/// Projections, CONSTRUCT templates and opaque fragments all contribute, so
/// the result is the union over the whole subtree.
#[derive(Debug, Clone, Default)]
pub struct VariableCollector {
    variables: BTreeSet<SmolStr>,
}

impl VariableCollector {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the variables of a whole query.
    pub fn collect_query(query: &Query) -> BTreeSet<SmolStr> {
        let mut collector = Self::new();
        let _ = collector.visit_query(query);
        collector.variables
    }

    /// Collects the variables of one statement and its descendants.
    pub fn collect_statement(statement: &Statement) -> BTreeSet<SmolStr> {
        let mut collector = Self::new();
        let _ = collector.visit_statement(statement);
        collector.variables
    }

    /// Returns collected variable names.
    pub fn variables(&self) -> &BTreeSet<SmolStr> {
        &self.variables
    }

    /// Returns collected variable names and consumes this collector.
    pub fn into_variables(self) -> BTreeSet<SmolStr> {
        self.variables
    }
}

impl Visit for VariableCollector {
    type Break = ();

    fn visit_simple(&mut self, statement: &SimpleStatement) -> ControlFlow<Self::Break> {
        self.variables.extend(statement.variables());
        ControlFlow::Continue(())
    }

    fn visit_projection(&mut self, block: &ProjectionBlock) -> ControlFlow<Self::Break> {
        self.variables.extend(extract_variables(&block.projection));
        walk_projection(self, block)
    }

    fn visit_construct(&mut self, block: &ConstructBlock) -> ControlFlow<Self::Break> {
        self.variables.extend(extract_variables(&block.template));
        walk_construct(self, block)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::visit::Visit;
    use crate::ast::visitors::variable::VariableCollector;
    use crate::parse;

    #[test]
    fn collects_projection_and_body_variables() {
        let query = parse("SELECT ?name WHERE { ?p <http://xmlns.com/foaf/0.1/name> ?name . }")
            .expect("query parses");

        let mut collector = VariableCollector::new();
        let _ = collector.visit_query(&query);

        assert!(collector.variables().contains("name"));
        assert!(collector.variables().contains("p"));
        assert_eq!(collector.into_variables().len(), 2);
    }

    #[test]
    fn collects_filter_variables() {
        let query = parse("ASK { ?s ?p ?o . FILTER(?o > ?limit) }").expect("query parses");
        let vars = VariableCollector::collect_query(&query);
        assert!(vars.contains("limit"));
        assert!(vars.contains("o"));
    }

    #[test]
    fn collects_construct_template_variables() {
        let query = parse("CONSTRUCT { ?s <http://ex/p> ?copy } WHERE { ?s ?p ?o }")
            .expect("query parses");
        let vars = VariableCollector::collect_query(&query);
        assert!(vars.contains("copy"));
        assert!(vars.contains("o"));
    }
}
