//! Operation descriptors: one callable overload each.

use super::param::ParamSpec;
use super::return_spec::ReturnSpec;
use crate::data_type::DataTypeCategory;
use crate::error::{CatalogError, CatalogResult};
use crate::pattern::PatternTemplate;
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::fmt;

/// Whether an operation is spelled as a function call or as operator syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// `name(arg, ...)` unless a custom pattern overrides it.
    Function,

    /// Always rendered from a pattern, e.g. `$ + $`.
    Operator,
}

/// Sampling priority used by the generator. Ordered `Low < Default < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Relevance {
    Low,
    #[default]
    Default,
    High,
}

/// One catalog entry describing a specific operation overload.
///
/// Descriptors are built once while the catalog is populated and are never
/// mutated afterwards, so they can be shared freely between generator workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: SmolStr,
    kind: OperationKind,
    params: Vec<ParamSpec>,
    return_spec: ReturnSpec,
    is_aggregation: bool,
    relevance: Relevance,
    custom_patterns: BTreeMap<usize, PatternTemplate>,
    enabled: bool,
    comment: Option<SmolStr>,
}

impl OperationDescriptor {
    /// Creates a function descriptor rendered as `name(args...)`.
    pub fn function(
        name: impl Into<SmolStr>,
        params: Vec<ParamSpec>,
        return_spec: ReturnSpec,
    ) -> Self {
        Self {
            name: name.into(),
            kind: OperationKind::Function,
            params,
            return_spec,
            is_aggregation: false,
            relevance: Relevance::Default,
            custom_patterns: BTreeMap::new(),
            enabled: true,
            comment: None,
        }
    }

    /// Creates an operator descriptor rendered from `pattern` at its own arity.
    pub fn operator(
        name: impl Into<SmolStr>,
        pattern: &str,
        params: Vec<ParamSpec>,
        return_spec: ReturnSpec,
    ) -> Self {
        let arity = params.len();
        let mut descriptor = Self::function(name, params, return_spec).with_pattern(arity, pattern);
        descriptor.kind = OperationKind::Operator;
        descriptor
    }

    /// Marks this descriptor as an aggregation.
    pub fn aggregation(mut self) -> Self {
        self.is_aggregation = true;
        self
    }

    /// Sets the relevance tier.
    pub fn with_relevance(mut self, relevance: Relevance) -> Self {
        self.relevance = relevance;
        self
    }

    /// Registers a rendering template for calls with exactly `arity` arguments.
    pub fn with_pattern(mut self, arity: usize, template: &str) -> Self {
        self.custom_patterns
            .insert(arity, PatternTemplate::parse(template));
        self
    }

    /// Keeps the descriptor in the catalog but out of default selections.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Attaches a free-text comment.
    pub fn with_comment(mut self, comment: impl Into<SmolStr>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn return_spec(&self) -> &ReturnSpec {
        &self.return_spec
    }

    /// Declared (fixed) number of arguments.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_aggregation(&self) -> bool {
        self.is_aggregation
    }

    pub fn relevance(&self) -> Relevance {
        self.relevance
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Template registered for `arity`, if any.
    pub fn custom_pattern(&self, arity: usize) -> Option<&PatternTemplate> {
        self.custom_patterns.get(&arity)
    }

    /// All registered templates, ordered by arity.
    pub fn custom_patterns(&self) -> impl Iterator<Item = (usize, &PatternTemplate)> {
        self.custom_patterns.iter().map(|(arity, tpl)| (*arity, tpl))
    }

    /// Returns true if this overload accepts the given argument categories.
    ///
    /// Arity is strict: the argument count must equal the declared arity, and
    /// every argument must be accepted by the parameter in its position.
    pub fn is_applicable(&self, args: &[DataTypeCategory]) -> bool {
        args.len() == self.params.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(arg))
    }

    /// Computes the result category for an applicable argument list.
    ///
    /// Only meaningful after [`is_applicable`](Self::is_applicable) returned
    /// true. An error here means the descriptor itself is malformed, which
    /// catalog validation rules out at startup.
    pub fn resolve_return_type(
        &self,
        args: &[DataTypeCategory],
    ) -> CatalogResult<DataTypeCategory> {
        self.return_spec
            .resolve(&self.params, args)
            .ok_or_else(|| CatalogError::UnresolvableReturnType {
                name: self.name.clone(),
                arity: self.arity(),
                args: join_display(args),
            })
    }

    /// Renders the call as SQL.
    ///
    /// Uses the template registered for `args.len()` if there is one, and
    /// `name(arg_0, ..., arg_n)` otherwise.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> CatalogResult<String> {
        if let Some(template) = self.custom_patterns.get(&args.len()) {
            return template
                .substitute(args)
                .ok_or_else(|| CatalogError::PlaceholderMismatch {
                    name: self.name.clone(),
                    pattern: SmolStr::new(template.as_str()),
                    placeholders: template.placeholder_count(),
                    arguments: args.len(),
                });
        }

        if self.kind == OperationKind::Operator {
            return Err(CatalogError::MissingOperatorPattern {
                name: self.name.clone(),
                arity: args.len(),
            });
        }

        let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        Ok(format!("{}({})", self.name, args.join(", ")))
    }
}

impl fmt::Display for OperationDescriptor {
    /// Signature form, e.g. `string_agg(text, text) -> text`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) -> {}",
            self.name,
            join_display(&self.params),
            self.return_spec
        )
    }
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
