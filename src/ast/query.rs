//! The top-level query object.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use smol_str::SmolStr;

use crate::ast::statement::Statement;
use crate::ast::visitors::{GraphCollector, GraphRewriter, VariableCollector};

/// The form of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Select,
    Construct,
    Ask,
    Describe,
    Update,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Select => "SELECT",
            QueryType::Construct => "CONSTRUCT",
            QueryType::Ask => "ASK",
            QueryType::Describe => "DESCRIBE",
            QueryType::Update => "UPDATE",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed (or programmatically assembled) query.
///
/// Owns the prologue (BASE and PREFIX declarations), the outer dataset
/// graph and the ordered top-level statements. Variable and graph sets are
/// derived from the tree on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub(crate) base: Option<SmolStr>,
    pub(crate) prefixes: BTreeMap<SmolStr, SmolStr>,
    pub(crate) query_type: QueryType,
    pub(crate) graph: Option<SmolStr>,
    pub(crate) statements: Vec<Statement>,
    pub(crate) original_text: String,
}

impl Query {
    /// Creates an empty query of the given form, with no original text.
    pub fn new(query_type: QueryType) -> Self {
        Self {
            base: None,
            prefixes: BTreeMap::new(),
            query_type,
            graph: None,
            statements: Vec::new(),
            original_text: String::new(),
        }
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    pub fn set_query_type(&mut self, query_type: QueryType) {
        self.query_type = query_type;
    }

    /// The `BASE` IRI, without angle brackets.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn set_base(&mut self, base: Option<SmolStr>) {
        self.base = base;
    }

    /// Declared prefixes: label (without `:`) to IRI (without angle brackets).
    pub fn prefixes(&self) -> &BTreeMap<SmolStr, SmolStr> {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut BTreeMap<SmolStr, SmolStr> {
        &mut self.prefixes
    }

    /// The outer dataset graph from `FROM`, `FROM NAMED` or `WITH`.
    pub fn graph(&self) -> Option<&str> {
        self.graph.as_deref()
    }

    /// Sets the outer graph. An empty IRI unsets it.
    pub fn set_graph(&mut self, graph: impl Into<SmolStr>) {
        let graph = graph.into();
        self.graph = (!graph.is_empty()).then_some(graph);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statements_mut(&mut self) -> &mut Vec<Statement> {
        &mut self.statements
    }

    pub fn push_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// The text this query was parsed from; empty when built programmatically.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Every variable referenced anywhere in the query, without the `?` sigil.
    pub fn unknown_variables(&self) -> BTreeSet<SmolStr> {
        VariableCollector::collect_query(self)
    }

    /// Every graph IRI named anywhere in the query.
    pub fn graphs(&self) -> BTreeSet<SmolStr> {
        GraphCollector::collect_query(self)
    }

    /// Sets the outer graph and the graph of every group and projection to `new_graph`.
    ///
    /// An empty `new_graph` removes all graph tags.
    pub fn rewrite_graph(&mut self, new_graph: &str) {
        tracing::debug!(new_graph, "rewriting all graphs");
        GraphRewriter::rewrite_all(new_graph).rewrite_query(self);
    }

    /// Retargets the outer graph and graph tags that currently equal `old_graph`.
    pub fn replace_graph(&mut self, old_graph: &str, new_graph: &str) {
        tracing::debug!(old_graph, new_graph, "replacing graph");
        GraphRewriter::replace(old_graph, new_graph).rewrite_query(self);
    }

    /// Returns a fully independent copy.
    pub fn deep_clone(&self) -> Query {
        self.clone()
    }

    /// Renders the query as SPARQL text.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}
