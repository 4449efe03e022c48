//! Source span primitive shared by tokens and diagnostics.

use std::ops::Range;

/// A span representing a byte range in query text.
/// This is the canonical span type used throughout the parser.
pub type Span = Range<usize>;
