//! Top-level dispatch: prologue, dataset clauses and the query form.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::ast::{AskBlock, Query, QueryType, Statement, WhereBlock};
use crate::lexer::keywords::{Keyword, lookup_keyword};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::group::BodyStyle;

/// Prologue and query-form state collected while dispatching.
#[derive(Default)]
struct Header {
    base: Option<SmolStr>,
    prefixes: BTreeMap<SmolStr, SmolStr>,
    graph: Option<SmolStr>,
    query_type: Option<QueryType>,
    prologue_done: bool,
}

impl Parser<'_> {
    /// Parses a complete query.
    pub(crate) fn parse_query(&mut self) -> ParseResult<Query> {
        let mut header = Header::default();
        let mut statements = Vec::new();

        while let Some(token) = self.cursor.peek_next() {
            if token.as_str() == ";" {
                self.cursor.next();
                continue;
            }

            let Some(keyword) = lookup_keyword(token.as_str()) else {
                return Err(self.cursor.error_found("expected a query keyword"));
            };
            tracing::trace!(%keyword, line = self.cursor.current_line(), "dispatching");

            match keyword {
                Keyword::Prefix | Keyword::Base => {
                    if header.prologue_done {
                        return Err(self
                            .cursor
                            .error_found("expected PREFIX and BASE before the query form"));
                    }
                    self.cursor.next();
                    if keyword == Keyword::Prefix {
                        let (label, iri) = self.parse_prefix()?;
                        header.prefixes.insert(label, iri);
                    } else {
                        header.base = Some(self.expect_iri()?);
                    }
                    continue;
                }
                // Dataset clauses leave the prologue open: PREFIX may still follow.
                Keyword::From | Keyword::With => {
                    self.cursor.next();
                    if keyword == Keyword::From {
                        self.eat_keyword(Keyword::Named);
                    }
                    header.graph = Some(self.expect_iri()?);
                    continue;
                }
                _ => header.prologue_done = true,
            }

            match keyword {
                Keyword::Select | Keyword::Construct | Keyword::Describe | Keyword::Ask => {
                    if header.query_type.is_some() {
                        return Err(self.cursor.error_found("expected a single query form"));
                    }
                    self.cursor.next();
                    match keyword {
                        Keyword::Select => {
                            header.query_type = Some(QueryType::Select);
                            let block = self.parse_projection_form(false)?;
                            statements.push(Statement::Select(Box::new(block)));
                        }
                        Keyword::Describe => {
                            header.query_type = Some(QueryType::Describe);
                            let block = self.parse_projection_form(false)?;
                            statements.push(Statement::Describe(Box::new(block)));
                            break;
                        }
                        Keyword::Construct => {
                            header.query_type = Some(QueryType::Construct);
                            let block = self.parse_construct()?;
                            statements.push(Statement::Construct(Box::new(block)));
                            break;
                        }
                        _ => {
                            header.query_type = Some(QueryType::Ask);
                            if self.eat_keyword(Keyword::From) {
                                self.eat_keyword(Keyword::Named);
                                header.graph = Some(self.expect_iri()?);
                            }
                            let block = self.parse_ask()?;
                            statements.push(Statement::Ask(block));
                            break;
                        }
                    }
                }
                Keyword::Insert | Keyword::Delete => {
                    if header
                        .query_type
                        .is_some_and(|query_type| query_type != QueryType::Update)
                    {
                        return Err(self
                            .cursor
                            .error_found("expected no update operation after a query form"));
                    }
                    self.cursor.next();
                    header.query_type = Some(QueryType::Update);
                    let block = self.parse_update(keyword)?;
                    statements.push(Statement::Update(Box::new(block)));
                }
                Keyword::Where => {
                    self.cursor.next();
                    self.expect_open_brace()?;
                    let body = self.parse_body(BodyStyle::Segmented)?;
                    statements.push(Statement::Where(WhereBlock::new(body)));
                }
                _ => return Err(self.cursor.error_found("expected a query keyword")),
            }
        }

        let Some(query_type) = header.query_type else {
            return Err(self.cursor.error_found(
                "expected SELECT, CONSTRUCT, DESCRIBE, ASK, INSERT or DELETE",
            ));
        };

        Ok(Query {
            base: header.base,
            prefixes: header.prefixes,
            query_type,
            graph: header.graph,
            statements,
            original_text: self.source.to_string(),
        })
    }

    /// Parses `label: <iri>` after PREFIX.
    ///
    /// The colon may be glued to the label (`foaf:`) or stand alone (`foaf :`).
    fn parse_prefix(&mut self) -> ParseResult<(SmolStr, SmolStr)> {
        let label = self.cursor.expect_next("expected a prefix label")?;
        let name = match label.as_str().strip_suffix(':') {
            Some(name) => SmolStr::new(name),
            None => {
                let colon = self.cursor.expect_next("expected ':'")?;
                if colon.as_str() != ":" {
                    return Err(self.cursor.error_at(&colon, "expected ':'"));
                }
                label.text.clone()
            }
        };
        let iri = self.expect_iri()?;
        tracing::trace!(prefix = %name, %iri, "declared prefix");
        Ok((name, iri))
    }

    /// Parses the body of an ASK query (`WHERE` is optional).
    fn parse_ask(&mut self) -> ParseResult<AskBlock> {
        self.eat_keyword_glued(Keyword::Where);
        self.expect_open_brace()?;
        let statements = self.parse_body(BodyStyle::Segmented)?;
        Ok(AskBlock::new(statements))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{QueryType, StatementKind};
    use crate::parse;

    #[test]
    fn prefixes_with_glued_and_separate_colons() {
        let query = parse(
            "PREFIX foaf: <http://xmlns.com/foaf/0.1/>\nPREFIX ex : <http://ex/>\nPREFIX : <http://default/>\nSELECT * WHERE { ?s ?p ?o }",
        )
        .expect("query parses");
        let prefixes = query.prefixes();
        assert_eq!(prefixes.len(), 3);
        assert_eq!(prefixes["foaf"], "http://xmlns.com/foaf/0.1/");
        assert_eq!(prefixes["ex"], "http://ex/");
        assert_eq!(prefixes[""], "http://default/");
    }

    #[test]
    fn prefix_redefinition_overwrites() {
        let query = parse("PREFIX a: <http://one/> PREFIX a: <http://two/> ASK { ?s ?p ?o }")
            .expect("query parses");
        assert_eq!(query.prefixes()["a"], "http://two/");
    }

    #[test]
    fn base_is_recorded() {
        let query = parse("BASE <http://base/> ASK { ?s ?p ?o }").expect("query parses");
        assert_eq!(query.base(), Some("http://base/"));
    }

    #[test]
    fn prefix_after_query_form_fails() {
        let err = parse("SELECT * WHERE { ?s ?p ?o } PREFIX a: <http://a/>").expect_err("late prefix");
        assert_eq!(err.expected(), "expected PREFIX and BASE before the query form");
        assert_eq!(err.found(), "PREFIX");
    }

    #[test]
    fn with_sets_outer_graph_without_ending_prologue() {
        let query = parse("WITH <http://g> PREFIX a: <http://a/> DELETE { ?s ?p ?o } WHERE { ?s ?p ?o }")
            .expect("query parses");
        assert_eq!(query.graph(), Some("http://g"));
        assert_eq!(query.query_type(), QueryType::Update);
    }

    #[test]
    fn from_before_prefix_keeps_prologue_open() {
        let query = parse("FROM NAMED <http://g> PREFIX a: <http://a/> SELECT * WHERE { ?s a:p ?o }")
            .expect("query parses");
        assert_eq!(query.graph(), Some("http://g"));
        assert_eq!(query.prefixes()["a"], "http://a/");
    }

    #[test]
    fn prefix_after_update_template_fails() {
        let err = parse("WITH <http://g> DELETE DATA { <a> <b> <c> } PREFIX a: <http://a/>")
            .expect_err("late prefix");
        assert_eq!(err.expected(), "expected PREFIX and BASE before the query form");
    }

    #[test]
    fn second_query_form_fails() {
        let err = parse("SELECT * WHERE { ?s ?p ?o } SELECT * WHERE { ?s ?p ?o }")
            .expect_err("two forms");
        assert_eq!(err.expected(), "expected a single query form");
    }

    #[test]
    fn update_after_select_fails() {
        let err = parse("SELECT * WHERE { ?s ?p ?o } INSERT DATA { <a> <b> <c> }")
            .expect_err("mixed");
        assert_eq!(err.found(), "INSERT");
    }

    #[test]
    fn semicolons_between_updates_are_skipped() {
        let query = parse("INSERT DATA { <a> <b> <c> } ; DELETE DATA { <a> <b> <d> } ;")
            .expect("query parses");
        assert_eq!(query.statements().len(), 2);
    }

    #[test]
    fn unknown_top_level_token_fails() {
        let err = parse("FOO SELECT * WHERE { }").expect_err("unknown keyword");
        assert_eq!(err.expected(), "expected a query keyword");
        assert_eq!(err.found(), "FOO");
    }

    #[test]
    fn standalone_where_is_kept() {
        let query = parse("DELETE DATA { <a> <b> <c> } ; WHERE { ?s ?p ?o }").expect("query parses");
        let kinds: Vec<_> = query.statements().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec![StatementKind::Update, StatementKind::Where]);
    }

    #[test]
    fn ask_ends_dispatch() {
        let query = parse("ASK { ?s ?p ?o } SELECT * WHERE { ?s ?p ?o }").expect("query parses");
        assert_eq!(query.query_type(), QueryType::Ask);
        assert_eq!(query.statements().len(), 1);
    }

    #[test]
    fn ask_accepts_from_and_where() {
        let query = parse("ASK FROM NAMED <http://g> WHERE { ?s ?p ?o }").expect("query parses");
        assert_eq!(query.graph(), Some("http://g"));
        assert_eq!(query.statements()[0].kind(), StatementKind::Ask);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let query = parse("prefix ex: <http://ex/> select distinct ?s where { ?s ?p ?o } limit 5")
            .expect("query parses");
        assert_eq!(query.query_type(), QueryType::Select);
        assert_eq!(query.prefixes()["ex"], "http://ex/");
    }
}
