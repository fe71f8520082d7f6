//! Diagnostic model for catalog validation problems.
//!
//! Catalog problems are collected as [`Diag`] values while every descriptor is
//! checked, so that a single validation run reports all of them at once. A
//! diagnostic about a rendering template carries the template text as its
//! [`TemplateSource`] and labels the relevant spans inside it; everything else
//! is a plain message naming the descriptor.

use crate::span::Span;
use miette::{Diagnostic, LabeledSpan, NamedSource, Report, Severity};
use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// The catalog cannot be used.
    Error,
    /// Suspicious, but the catalog is still usable.
    Warning,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// A labeled span within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    pub span: Span,
    pub message: String,
}

/// Template text a diagnostic's labels point into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    content: String,
    name: String,
}

impl TemplateSource {
    /// Creates a template source named after the descriptor and arity it belongs to.
    pub fn new(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: name.into(),
        }
    }

    /// Returns the template text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the display name, e.g. `string_agg/2`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clamps a span to valid bounds within this template.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// A structured catalog diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// The severity level of this diagnostic.
    pub severity: DiagSeverity,
    /// The main diagnostic message.
    pub message: String,
    /// Labeled spans inside [`Diag::source`].
    pub labels: Vec<DiagLabel>,
    /// Optional help text suggesting how to fix the descriptor.
    pub help: Option<String>,
    /// Additional notes.
    pub notes: Vec<String>,
    /// Optional diagnostic code (e.g. `catalog::placeholder_count`).
    pub code: Option<String>,
    /// Template the labels refer to, if any.
    pub source: Option<TemplateSource>,
}

impl Diag {
    /// Creates a new diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
            source: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Warning, message)
    }

    /// Labels a span of the attached template.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel {
            span,
            message: message.into(),
        });
        self
    }

    /// Sets the help text for this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches the template the labels point into.
    pub fn with_source(mut self, source: TemplateSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns true for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == DiagSeverity::Error
    }

    /// Converts this diagnostic to a miette [`Report`], attaching the template
    /// as source code when there is one.
    pub fn to_report(&self) -> Report {
        let report = Report::new(build_diagnostic(self));
        match &self.source {
            Some(source) => report.with_source_code(NamedSource::new(
                source.name(),
                source.content().to_string(),
            )),
            None => report,
        }
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Converts a batch of diagnostics to miette reports.
pub fn convert_diagnostics_to_reports(diagnostics: &[Diag]) -> Vec<Report> {
    diagnostics.iter().map(Diag::to_report).collect()
}

fn build_diagnostic(diag: &Diag) -> BuiltDiagnostic {
    // Labels are meaningless without a template to point into.
    let labels = match &diag.source {
        Some(source) => diag
            .labels
            .iter()
            .map(|label| {
                let clamped = source.clamp_span(&label.span);
                let span = (clamped.start, clamped.end - clamped.start);
                LabeledSpan::new_primary_with_span(Some(label.message.clone()), span)
            })
            .collect(),
        None => Vec::new(),
    };

    BuiltDiagnostic {
        message: diag.message.clone(),
        severity: match diag.severity {
            DiagSeverity::Error => Severity::Error,
            DiagSeverity::Warning => Severity::Warning,
        },
        code: diag.code.clone(),
        help: diag.help.clone(),
        labels,
        related: diag.notes.iter().cloned().map(NoteDiagnostic).collect(),
    }
}

#[derive(Debug)]
struct BuiltDiagnostic {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    related: Vec<NoteDiagnostic>,
}

#[derive(Debug)]
struct NoteDiagnostic(String);

impl fmt::Display for NoteDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BuiltDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuiltDiagnostic {}
impl std::error::Error for NoteDiagnostic {}

impl Diagnostic for BuiltDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.clone().into_iter()))
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.related.is_empty() {
            None
        } else {
            Some(Box::new(
                self.related.iter().map(|note| note as &dyn Diagnostic),
            ))
        }
    }
}

impl Diagnostic for NoteDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Advice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(text: &str) -> TemplateSource {
        TemplateSource::new(text, "string_agg/2")
    }

    #[test]
    fn severity_display() {
        assert_eq!(DiagSeverity::Error.to_string(), "error");
        assert_eq!(DiagSeverity::Warning.to_string(), "warning");
    }

    #[test]
    fn builder_collects_parts() {
        let diag = Diag::error("placeholder count mismatch")
            .with_label(11..12, "third placeholder")
            .with_help("remove the extra `$`")
            .with_note("pattern is keyed by arity 2")
            .with_code("catalog::placeholder_count");

        assert!(diag.is_error());
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.labels[0].span, 11..12);
        assert_eq!(diag.help.as_deref(), Some("remove the extra `$`"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.code.as_deref(), Some("catalog::placeholder_count"));
    }

    #[test]
    fn display_prefixes_severity() {
        let diag = Diag::warning("operation 'x' is never enabled");
        assert_eq!(diag.to_string(), "warning: operation 'x' is never enabled");
    }

    #[test]
    fn template_source_clamps_spans() {
        let src = template("max($)");
        assert_eq!(src.clamp_span(&(0..100)), 0..6);
        let inverted = std::ops::Range { start: 4, end: 2 };
        assert_eq!(src.clamp_span(&inverted), 4..4);
        assert_eq!(src.clamp_span(&(10..20)), 6..6);
    }

    #[test]
    fn report_with_template_keeps_labels() {
        let diag = Diag::error("too many placeholders")
            .with_label(4..5, "extra")
            .with_source(template("max($, $)"));

        let report = diag.to_report();
        assert_eq!(report.to_string(), "too many placeholders");
        let built = build_diagnostic(&diag);
        assert_eq!(built.labels.len(), 1);
        assert!(built.labels[0].primary());
        assert_eq!(built.labels[0].label(), Some("extra"));
    }

    #[test]
    fn labels_dropped_without_template() {
        let diag = Diag::error("no wildcard slot").with_label(0..3, "here");
        let built = build_diagnostic(&diag);
        assert!(built.labels.is_empty());
        assert_eq!(diag.to_report().to_string(), "no wildcard slot");
    }

    #[test]
    fn notes_become_related_diagnostics() {
        let diag = Diag::error("root issue")
            .with_note("first note")
            .with_note("second note");

        let built = build_diagnostic(&diag);
        let related = built
            .related()
            .expect("expected related diagnostics")
            .collect::<Vec<_>>();
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].to_string(), "first note");
        assert_eq!(related[0].severity(), Some(Severity::Advice));
    }

    #[test]
    fn convert_multiple_diagnostics() {
        let diags = vec![Diag::error("error 1"), Diag::warning("warning 1")];
        let reports = convert_diagnostics_to_reports(&diags);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].to_string(), "error 1");
        assert_eq!(reports[1].to_string(), "warning 1");
    }

    #[test]
    fn warning_keeps_its_severity() {
        let built = build_diagnostic(&Diag::warning("never enabled"));
        assert_eq!(built.severity(), Some(Severity::Warning));
        assert!(!Diag::warning("never enabled").is_error());
    }
}
