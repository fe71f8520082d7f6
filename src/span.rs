//! Spans and spanned values inside rendering templates.

use std::ops::Range;

/// A byte range inside a template string.
pub type Span = Range<usize>;

/// A value with an associated template span.
///
/// Template tokens keep their location so that diagnostics about a malformed
/// pattern can point at the offending placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Where the value appears in the template.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}
