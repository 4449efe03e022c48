//! SPARQL rendering of the query tree.
//!
//! Output is valid SPARQL but not byte-identical to the parsed text: opaque
//! fragments keep their content while structure is re-laid out with one
//! child per line.

use std::fmt::{self, Display, Formatter};

use crate::ast::query::Query;
use crate::ast::statement::{
    AskBlock, ConstructBlock, GroupBlock, ProjectionBlock, SimpleStatement, Statement,
    UpdateBlock, WhereBlock,
};

fn write_body(f: &mut Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    f.write_str("{")?;
    for statement in statements {
        write!(f, "\n{statement}")?;
    }
    f.write_str("\n}")
}

fn write_solution_modifiers(f: &mut Formatter<'_>, modifiers: &[String]) -> fmt::Result {
    for modifier in modifiers {
        write!(f, "\n{modifier}")?;
    }
    Ok(())
}

fn write_projection(f: &mut Formatter<'_>, keyword: &str, block: &ProjectionBlock) -> fmt::Result {
    if block.in_block {
        f.write_str("{\n")?;
    }
    f.write_str(keyword)?;
    if let Some(modifier) = block.modifier {
        write!(f, " {modifier}")?;
    }
    if !block.projection.is_empty() {
        write!(f, " {}", block.projection)?;
    }
    if let Some(graph) = &block.graph {
        let named = if block.from_named { "NAMED " } else { "" };
        write!(f, "\nFROM {named}<{graph}>")?;
    }
    f.write_str("\nWHERE ")?;
    write_body(f, &block.statements)?;
    write_solution_modifiers(f, &block.solution_modifiers)?;
    if block.in_block {
        f.write_str("\n}")?;
    }
    Ok(())
}

impl Display for SimpleStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Display for GroupBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.graph, self.optional) {
            (Some(graph), true) => {
                write!(f, "OPTIONAL {{\nGRAPH <{graph}> ")?;
                write_body(f, &self.statements)?;
                f.write_str("\n}")
            }
            (Some(graph), false) => {
                write!(f, "GRAPH <{graph}> ")?;
                write_body(f, &self.statements)
            }
            (None, true) => {
                f.write_str("OPTIONAL ")?;
                write_body(f, &self.statements)
            }
            (None, false) => write_body(f, &self.statements),
        }
    }
}

impl Display for WhereBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("WHERE ")?;
        write_body(f, &self.statements)
    }
}

impl Display for UpdateBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.operation)?;
        if self.data {
            f.write_str("DATA ")?;
        }
        write_body(f, &self.statements)?;
        if let Some(where_block) = &self.where_block {
            write!(f, "\n{where_block}")?;
        }
        Ok(())
    }
}

impl Display for ConstructBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("CONSTRUCT {")?;
        let template = self.template.trim();
        if !template.is_empty() {
            write!(f, "\n{template}")?;
        }
        f.write_str("\n}\nWHERE ")?;
        write_body(f, &self.statements)?;
        write_solution_modifiers(f, &self.solution_modifiers)
    }
}

impl Display for AskBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("ASK ")?;
        write_body(f, &self.statements)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Simple(simple) => simple.fmt(f),
            Statement::Group(group) => group.fmt(f),
            Statement::Where(block) => block.fmt(f),
            Statement::Update(block) => block.fmt(f),
            Statement::Select(block) => write_projection(f, "SELECT", block),
            Statement::Describe(block) => write_projection(f, "DESCRIBE", block),
            Statement::Construct(block) => block.fmt(f),
            Statement::Ask(block) => block.fmt(f),
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = Vec::new();
        if let Some(base) = &self.base {
            lines.push(format!("BASE <{base}>"));
        }
        for (label, iri) in &self.prefixes {
            lines.push(format!("PREFIX {label}: <{iri}>"));
        }
        if let Some(graph) = &self.graph {
            lines.push(format!("WITH <{graph}>"));
        }
        lines.extend(self.statements.iter().map(Statement::to_string));
        f.write_str(&lines.join("\n"))
    }
}
