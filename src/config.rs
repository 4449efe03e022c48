//! Parser configuration.

/// Tunables for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Number of previously consumed tokens quoted in error messages.
    pub context_tokens: usize,

    /// Require a WHERE clause after an INSERT/DELETE template that uses variables.
    pub strict_update_where: bool,

    /// Deepest allowed nesting of groups and sub-selects inside a body.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            context_tokens: 5,
            strict_update_where: true,
            max_depth: 128,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostic context window.
    pub fn with_context_tokens(mut self, context_tokens: usize) -> Self {
        self.context_tokens = context_tokens;
        self
    }

    /// Enables or disables the WHERE requirement on update templates.
    pub fn with_strict_update_where(mut self, strict: bool) -> Self {
        self.strict_update_where = strict;
        self
    }

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
