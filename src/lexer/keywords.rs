//! Keyword recognition for SPARQL.
//!
//! SPARQL keywords are case-insensitive. The splitter does not classify
//! keywords itself; the parser asks here whether a word token is one.

use std::fmt;

/// Keywords the structural parser reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Prologue
    Base,
    Prefix,

    // Query forms
    Select,
    Construct,
    Describe,
    Ask,

    // Update forms
    Insert,
    Delete,
    Data,

    // Dataset and graph patterns
    Where,
    From,
    Named,
    With,
    Graph,
    Optional,

    // Projection modifiers
    Distinct,
    Reduced,

    // Solution modifiers
    Limit,
    Offset,
    Order,
    Group,
    By,
}

impl Keyword {
    /// Returns the canonical upper-case spelling of the keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Base => "BASE",
            Keyword::Prefix => "PREFIX",
            Keyword::Select => "SELECT",
            Keyword::Construct => "CONSTRUCT",
            Keyword::Describe => "DESCRIBE",
            Keyword::Ask => "ASK",
            Keyword::Insert => "INSERT",
            Keyword::Delete => "DELETE",
            Keyword::Data => "DATA",
            Keyword::Where => "WHERE",
            Keyword::From => "FROM",
            Keyword::Named => "NAMED",
            Keyword::With => "WITH",
            Keyword::Graph => "GRAPH",
            Keyword::Optional => "OPTIONAL",
            Keyword::Distinct => "DISTINCT",
            Keyword::Reduced => "REDUCED",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Order => "ORDER",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
        }
    }

    /// Returns true if `text` is exactly this keyword, ignoring ASCII case.
    pub fn is(&self, text: &str) -> bool {
        text.eq_ignore_ascii_case(self.as_str())
    }

    /// Returns true if `text` is this keyword, possibly glued to a following
    /// `<`, `{` or `(`.
    ///
    /// A glued token such as `optional{` must be split with
    /// [`TokenCursor::break_off`](crate::parser::base::TokenCursor::break_off)
    /// once consumed. Prefixed names like `graph:label` do not match.
    pub fn starts(&self, text: &str) -> bool {
        let keyword = self.as_str();
        match text.get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => {
                matches!(text[keyword.len()..].chars().next(), None | Some('<' | '{' | '('))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up a keyword by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<Keyword> {
    match name.to_ascii_uppercase().as_str() {
        "BASE" => Some(Keyword::Base),
        "PREFIX" => Some(Keyword::Prefix),
        "SELECT" => Some(Keyword::Select),
        "CONSTRUCT" => Some(Keyword::Construct),
        "DESCRIBE" => Some(Keyword::Describe),
        "ASK" => Some(Keyword::Ask),
        "INSERT" => Some(Keyword::Insert),
        "DELETE" => Some(Keyword::Delete),
        "DATA" => Some(Keyword::Data),
        "WHERE" => Some(Keyword::Where),
        "FROM" => Some(Keyword::From),
        "NAMED" => Some(Keyword::Named),
        "WITH" => Some(Keyword::With),
        "GRAPH" => Some(Keyword::Graph),
        "OPTIONAL" => Some(Keyword::Optional),
        "DISTINCT" => Some(Keyword::Distinct),
        "REDUCED" => Some(Keyword::Reduced),
        "LIMIT" => Some(Keyword::Limit),
        "OFFSET" => Some(Keyword::Offset),
        "ORDER" => Some(Keyword::Order),
        "GROUP" => Some(Keyword::Group),
        "BY" => Some(Keyword::By),
        _ => None,
    }
}
