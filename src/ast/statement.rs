//! Statement nodes of the query tree.
//!
//! A query body is a tree of [`Statement`]s. Clause bodies that the parser
//! does not model (triple patterns, filters, binds) are kept as opaque
//! [`SimpleStatement`] text; the structure around them (groups, GRAPH and
//! OPTIONAL tags, query forms, update templates) is explicit.

use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

use crate::ast::visitors::{GraphRewriter, VariableCollector};

/// Discriminant of a [`Statement`], for callers that only need to branch on the node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Simple,
    Group,
    Where,
    Update,
    Select,
    Describe,
    Construct,
    Ask,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Simple => "simple statement",
            StatementKind::Group => "group",
            StatementKind::Where => "WHERE block",
            StatementKind::Update => "update block",
            StatementKind::Select => "SELECT block",
            StatementKind::Describe => "DESCRIBE block",
            StatementKind::Construct => "CONSTRUCT block",
            StatementKind::Ask => "ASK block",
        };
        f.write_str(name)
    }
}

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Simple(SimpleStatement),
    Group(GroupBlock),
    Where(WhereBlock),
    Update(Box<UpdateBlock>),
    Select(Box<SelectBlock>),
    Describe(Box<DescribeBlock>),
    Construct(Box<ConstructBlock>),
    Ask(AskBlock),
}

impl Statement {
    /// Returns the node type.
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Simple(_) => StatementKind::Simple,
            Statement::Group(_) => StatementKind::Group,
            Statement::Where(_) => StatementKind::Where,
            Statement::Update(_) => StatementKind::Update,
            Statement::Select(_) => StatementKind::Select,
            Statement::Describe(_) => StatementKind::Describe,
            Statement::Construct(_) => StatementKind::Construct,
            Statement::Ask(_) => StatementKind::Ask,
        }
    }

    /// Renders this node as SPARQL text.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Variables referenced by this node and everything below it, without the `?` sigil.
    ///
    /// Computed on every call, so it reflects any mutation made since the parse.
    pub fn unknowns(&self) -> BTreeSet<SmolStr> {
        VariableCollector::collect_statement(self)
    }

    /// Returns an independent copy of this subtree.
    pub fn deep_clone(&self) -> Statement {
        self.clone()
    }

    /// Sets the graph of every group and projection in this subtree to `new_graph`.
    ///
    /// Untagged groups become `GRAPH` groups. An empty `new_graph` removes the tags.
    pub fn rewrite_graph(&mut self, new_graph: &str) {
        GraphRewriter::rewrite_all(new_graph).rewrite_statement(self);
    }

    /// Retargets graph tags equal to `old_graph` in this subtree to `new_graph`.
    pub fn replace_graph(&mut self, old_graph: &str, new_graph: &str) {
        GraphRewriter::replace(old_graph, new_graph).rewrite_statement(self);
    }

    /// The graph this node itself is tagged with, if any.
    pub fn graph(&self) -> Option<&str> {
        match self {
            Statement::Group(group) => group.graph.as_deref(),
            Statement::Select(block) | Statement::Describe(block) => block.graph.as_deref(),
            _ => None,
        }
    }

    /// Direct child statements (the body of this node).
    ///
    /// For an update block this is the template; the attached WHERE block is
    /// reachable through [`UpdateBlock::where_block`].
    pub fn statements(&self) -> &[Statement] {
        match self {
            Statement::Simple(_) => &[],
            Statement::Group(group) => &group.statements,
            Statement::Where(block) => &block.statements,
            Statement::Update(block) => &block.statements,
            Statement::Select(block) | Statement::Describe(block) => &block.statements,
            Statement::Construct(block) => &block.statements,
            Statement::Ask(block) => &block.statements,
        }
    }
}

/// An opaque clause fragment, such as one triple pattern or a FILTER expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStatement {
    text: String,
}

impl SimpleStatement {
    /// Creates a fragment; surrounding whitespace is dropped.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
        }
    }

    /// The fragment text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Variables mentioned in the fragment.
    pub fn variables(&self) -> BTreeSet<SmolStr> {
        extract_variables(&self.text)
    }
}

/// A brace-delimited group, optionally tagged `GRAPH <iri>` or `OPTIONAL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBlock {
    /// Named graph the group is scoped to.
    pub graph: Option<SmolStr>,
    /// Whether the group is an `OPTIONAL { .. }`.
    pub optional: bool,
    pub statements: Vec<Statement>,
}

impl GroupBlock {
    /// Creates a plain `{ .. }` group.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            graph: None,
            optional: false,
            statements,
        }
    }

    /// Creates a `GRAPH <graph> { .. }` group.
    pub fn graph(graph: impl Into<SmolStr>, statements: Vec<Statement>) -> Self {
        Self {
            graph: Some(graph.into()),
            optional: false,
            statements,
        }
    }

    /// Creates an `OPTIONAL { .. }` group.
    pub fn optional(statements: Vec<Statement>) -> Self {
        Self {
            graph: None,
            optional: true,
            statements,
        }
    }
}

/// A `WHERE { .. }` body standing on its own or attached to an update template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereBlock {
    pub statements: Vec<Statement>,
}

impl WhereBlock {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// The operation of an update template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOperation {
    Insert,
    Delete,
}

impl UpdateOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperation::Insert => "INSERT",
            UpdateOperation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for UpdateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `INSERT { .. }` / `DELETE { .. }` template with its optional WHERE body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBlock {
    pub operation: UpdateOperation,
    /// `INSERT DATA` / `DELETE DATA`.
    pub data: bool,
    pub statements: Vec<Statement>,
    pub where_block: Option<WhereBlock>,
}

impl UpdateBlock {
    /// Creates a template without a WHERE body.
    pub fn new(operation: UpdateOperation, statements: Vec<Statement>) -> Self {
        Self {
            operation,
            data: false,
            statements,
            where_block: None,
        }
    }

    /// Attaches a WHERE body.
    pub fn with_where(mut self, where_block: WhereBlock) -> Self {
        self.where_block = Some(where_block);
        self
    }
}

/// `DISTINCT` or `REDUCED` after SELECT / DESCRIBE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectModifier {
    Distinct,
    Reduced,
}

impl SelectModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectModifier::Distinct => "DISTINCT",
            SelectModifier::Reduced => "REDUCED",
        }
    }
}

impl fmt::Display for SelectModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SELECT or DESCRIBE query form.
///
/// Both forms share one shape: a projection, an optional dataset graph, a
/// WHERE body and trailing solution modifiers. The enclosing
/// [`Statement`] variant decides which keyword is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionBlock {
    pub modifier: Option<SelectModifier>,
    /// Projection text, e.g. `?s ?name` or `*`.
    pub projection: String,
    /// Graph from `FROM <iri>` / `FROM NAMED <iri>`.
    pub graph: Option<SmolStr>,
    /// Whether the dataset clause was `FROM NAMED`.
    pub from_named: bool,
    pub statements: Vec<Statement>,
    /// `LIMIT n`, `OFFSET n`, `ORDER BY key`, `GROUP BY ?var`, in source order.
    pub solution_modifiers: Vec<String>,
    /// Set for a sub-select, which renders inside its own braces.
    pub in_block: bool,
}

pub type SelectBlock = ProjectionBlock;
pub type DescribeBlock = ProjectionBlock;

impl ProjectionBlock {
    pub fn new(projection: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            projection: projection.into(),
            statements,
            ..Self::default()
        }
    }
}

/// A CONSTRUCT query form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructBlock {
    /// Template text between the CONSTRUCT braces.
    pub template: String,
    pub statements: Vec<Statement>,
    pub solution_modifiers: Vec<String>,
}

impl ConstructBlock {
    pub fn new(template: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            template: template.into(),
            statements,
            solution_modifiers: Vec::new(),
        }
    }
}

/// An ASK query form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskBlock {
    pub statements: Vec<Statement>,
}

impl AskBlock {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// Extracts variable names from opaque clause text.
///
/// Every whitespace-delimited word is stripped of leading `(` and `!`; if it
/// then starts with `?`, the run of alphanumerics and `_` after the sigil is a
/// variable name. Variables inside filters and object positions count too.
pub fn extract_variables(text: &str) -> BTreeSet<SmolStr> {
    let mut variables = BTreeSet::new();
    for word in text.split_whitespace() {
        let word = word.trim_start_matches(['(', '!']);
        let Some(rest) = word.strip_prefix('?') else {
            continue;
        };
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end > 0 {
            variables.insert(SmolStr::new(&rest[..end]));
        }
    }
    variables
}
