//! Token types for rendering templates.

use logos::Logos;
use std::fmt;

/// The kind of a template token.
///
/// A template is nothing but placeholders and the literal SQL between them, so
/// every byte of input belongs to exactly one of the two kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateToken {
    /// `$`, substituted with the next argument expression.
    #[token("$")]
    Placeholder,

    /// A run of literal SQL, preserved verbatim.
    #[regex(r"[^$]+")]
    Literal,
}

impl fmt::Display for TemplateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateToken::Placeholder => write!(f, "placeholder"),
            TemplateToken::Literal => write!(f, "literal"),
        }
    }
}
