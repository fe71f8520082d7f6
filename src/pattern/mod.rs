//! Rendering templates for operations with custom SQL syntax.
//!
//! A template such as `string_agg($, $ ORDER BY row_index)` is split into
//! placeholder and literal segments once, at registration time. Rendering then
//! fills the placeholders left to right with argument expressions and copies
//! the literal segments verbatim.

pub mod token;

use crate::span::{Span, Spanned};
use logos::Logos;
use smol_str::SmolStr;
use token::TemplateToken;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Filled with the next argument expression.
    Placeholder,
    /// Copied verbatim.
    Literal(SmolStr),
}

/// A parsed rendering template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    source: SmolStr,
    segments: Vec<Spanned<Segment>>,
}

impl PatternTemplate {
    /// Parses a template. Every input is a valid template; whether its
    /// placeholder count fits the arity it is registered for is checked by
    /// catalog validation.
    pub fn parse(source: impl Into<SmolStr>) -> Self {
        let source = source.into();
        let segments = TemplateToken::lexer(&source)
            .spanned()
            .map(|(token, span)| {
                let segment = match token {
                    Ok(TemplateToken::Placeholder) => Segment::Placeholder,
                    // The two token kinds cover every byte, so a lexer error can only
                    // be a stretch of literal text.
                    Ok(TemplateToken::Literal) | Err(()) => {
                        Segment::Literal(SmolStr::new(&source[span.clone()]))
                    }
                };
                Spanned::new(segment, span)
            })
            .collect();

        Self { source, segments }
    }

    /// Returns the template text as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the parsed segments in order.
    pub fn segments(&self) -> &[Spanned<Segment>] {
        &self.segments
    }

    /// Number of `$` placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_spans().count()
    }

    /// Spans of the `$` placeholders, left to right.
    pub fn placeholder_spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.segments
            .iter()
            .filter(|seg| seg.node == Segment::Placeholder)
            .map(|seg| seg.span.clone())
    }

    /// Substitutes `args` into the placeholders.
    ///
    /// Returns `None` when the number of arguments differs from the number of
    /// placeholders.
    pub fn substitute<S: AsRef<str>>(&self, args: &[S]) -> Option<String> {
        if args.len() != self.placeholder_count() {
            return None;
        }

        let mut args = args.iter();
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match &segment.node {
                Segment::Placeholder => out.push_str(args.next()?.as_ref()),
                Segment::Literal(text) => out.push_str(text),
            }
        }
        Some(out)
    }
}

impl std::fmt::Display for PatternTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordered_array_agg() {
        let template = PatternTemplate::parse("array_agg($ ORDER BY row_index)");
        assert_eq!(template.placeholder_count(), 1);
        assert_eq!(template.placeholder_spans().collect::<Vec<_>>(), vec![10..11]);
        assert_eq!(
            template.segments()[0].node,
            Segment::Literal("array_agg(".into())
        );
    }

    #[test]
    fn substitutes_in_order() {
        let template = PatternTemplate::parse("string_agg($, $ ORDER BY row_index)");
        assert_eq!(
            template.substitute(&["a", "','"]).as_deref(),
            Some("string_agg(a, ',' ORDER BY row_index)")
        );
    }

    #[test]
    fn operator_template() {
        let template = PatternTemplate::parse("$ + $");
        assert_eq!(template.substitute(&["1", "x"]).as_deref(), Some("1 + x"));
    }

    #[test]
    fn argument_count_must_match() {
        let template = PatternTemplate::parse("$ + $");
        assert_eq!(template.substitute(&["1"]), None);
        assert_eq!(template.substitute(&["1", "2", "3"]), None);
    }

    #[test]
    fn template_without_placeholders() {
        let template = PatternTemplate::parse("pi()");
        assert_eq!(template.placeholder_count(), 0);
        let no_args: [&str; 0] = [];
        assert_eq!(template.substitute(&no_args).as_deref(), Some("pi()"));
    }

    #[test]
    fn display_is_source_text() {
        let template = PatternTemplate::parse("NOT ($)");
        assert_eq!(template.to_string(), "NOT ($)");
        assert_eq!(template.as_str(), "NOT ($)");
    }
}
