//! Common test utilities
//!
//! Shared helpers for the integration suites.
//!
//! # Parsing Helpers
//! - [`parse_ok`] - Parse source and return the query, panicking with the report on failure
//! - [`parse_err`] - Parse source expecting a failure
//!
//! # Diagnostic Helpers
//! - [`format_report`] - Render a parse error as a miette report for assertions
//! - [`assert_error`] - Assert the `expected` and `found` parts of a parse error

#![allow(dead_code)]

use sparql_parser::{ParseError, Query, SourceFile, parse};

/// Render a parse error against its source as a miette report.
pub fn format_report(source: &str, err: &ParseError) -> String {
    format!("{:?}", err.to_report(&SourceFile::new(source)))
}

/// Parse source that is expected to be valid.
///
/// # Panics
/// Panics with the rendered report if parsing fails.
pub fn parse_ok(source: &str) -> Query {
    match parse(source) {
        Ok(query) => query,
        Err(err) => panic!(
            "unexpected parse error for `{source}`:\n{}",
            format_report(source, &err)
        ),
    }
}

/// Parse source that is expected to be rejected.
///
/// # Panics
/// Panics if parsing succeeds.
pub fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(query) => panic!("expected `{source}` to fail, parsed as {:?}", query.query_type()),
        Err(err) => err,
    }
}

/// Assert that `source` fails with the given `expected` and `found` texts.
pub fn assert_error(source: &str, expected: &str, found: &str) {
    let err = parse_err(source);
    assert_eq!(err.expected(), expected, "wrong expectation for `{source}`: {err}");
    assert_eq!(err.found(), found, "wrong offending token for `{source}`: {err}");
}

/// Sorted variable names as plain strings.
pub fn names(query: &Query) -> Vec<String> {
    query
        .unknown_variables()
        .iter()
        .map(ToString::to_string)
        .collect()
}
