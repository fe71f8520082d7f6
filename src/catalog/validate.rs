//! Startup validation of catalog descriptors.
//!
//! Every descriptor is checked for internal consistency once, before any
//! expression is generated from it. Problems are collected rather than
//! returned one at a time so that a broken catalog is reported in full.

use super::Catalog;
use crate::diag::{Diag, TemplateSource};
use crate::operation::{OperationDescriptor, OperationKind};
use crate::pattern::PatternTemplate;

/// Checks one descriptor and returns a diagnostic per problem found.
pub fn validate_descriptor(descriptor: &OperationDescriptor) -> Vec<Diag> {
    let mut diagnostics = Vec::new();
    let arity = descriptor.arity();

    if descriptor.name().trim().is_empty() {
        diagnostics.push(
            Diag::error(format!("operation with signature '{descriptor}' has an empty name"))
                .with_code("catalog::empty_name"),
        );
    }

    for (key, template) in descriptor.custom_patterns() {
        if key != arity {
            diagnostics.push(
                Diag::error(format!(
                    "'{}' declares {} parameter(s) but registers a pattern for arity {}",
                    descriptor.name(),
                    arity,
                    key
                ))
                .with_code("catalog::pattern_arity")
                .with_label(0..template.as_str().len(), "pattern is never used")
                .with_source(template_source(descriptor, key, template))
                .with_help(format!("key the pattern by {arity}, the declared arity")),
            );
        }
        if let Some(diag) = check_placeholders(descriptor, key, template) {
            diagnostics.push(diag);
        }
    }

    if descriptor.kind() == OperationKind::Operator && descriptor.custom_pattern(arity).is_none() {
        diagnostics.push(
            Diag::error(format!(
                "operator '{}' has no rendering pattern for its arity {}",
                descriptor.name(),
                arity
            ))
            .with_code("catalog::missing_operator_pattern"),
        );
    }

    let probe: Vec<_> = descriptor
        .params()
        .iter()
        .map(|param| param.representative())
        .collect();
    if descriptor.resolve_return_type(&probe).is_err() {
        diagnostics.push(
            Diag::error(format!(
                "return type '{}' of '{}/{}' cannot be resolved from its parameters",
                descriptor.return_spec(),
                descriptor.name(),
                arity
            ))
            .with_code("catalog::unresolvable_return_type")
            .with_note(format!("signature: {descriptor}"))
            .with_help("a sourceless dynamic return needs an `any` parameter"),
        );
    }

    for diag in &diagnostics {
        tracing::warn!(operation = descriptor.name(), arity, "{}", diag.message);
    }

    diagnostics
}

/// Checks overload families across the catalog.
///
/// A family whose every variant is disabled can never be selected by default.
/// That is reported as a warning and does not fail validation.
pub fn validate_families(catalog: &Catalog) -> Vec<Diag> {
    let mut diagnostics = Vec::new();
    for name in catalog.names() {
        let family = catalog.lookup_by_name(name);
        if family.iter().any(|descriptor| descriptor.is_enabled()) {
            continue;
        }
        tracing::warn!(operation = name, variants = family.len(), "no enabled variant");
        let diag = Diag::warning(format!("every variant of '{name}' is disabled"))
            .with_code("catalog::never_enabled")
            .with_help("enable one variant or drop the family");
        let diag = family
            .iter()
            .filter_map(|descriptor| descriptor.comment())
            .fold(diag, |diag, comment| diag.with_note(comment));
        diagnostics.push(diag);
    }
    diagnostics
}

fn check_placeholders(
    descriptor: &OperationDescriptor,
    key: usize,
    template: &PatternTemplate,
) -> Option<Diag> {
    let count = template.placeholder_count();
    if count == key {
        return None;
    }

    let diag = Diag::error(format!(
        "pattern '{}' of '{}' has {} placeholder(s) for arity {}",
        template, descriptor.name(), count, key
    ))
    .with_code("catalog::placeholder_count")
    .with_source(template_source(descriptor, key, template));

    let diag = if count > key {
        template
            .placeholder_spans()
            .skip(key)
            .fold(diag, |diag, span| {
                diag.with_label(span, "no argument left for this placeholder")
            })
    } else {
        diag.with_label(
            0..template.as_str().len(),
            format!("{} placeholder(s) missing", key - count),
        )
    };
    Some(diag)
}

fn template_source(
    descriptor: &OperationDescriptor,
    key: usize,
    template: &PatternTemplate,
) -> TemplateSource {
    TemplateSource::new(template.as_str(), format!("{}/{}", descriptor.name(), key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataTypeCategory;
    use crate::operation::{ParamSpec, ReturnSpec};

    fn codes(diags: &[Diag]) -> Vec<&str> {
        diags.iter().filter_map(|d| d.code.as_deref()).collect()
    }

    #[test]
    fn well_formed_descriptor_has_no_problems() {
        let descriptor = OperationDescriptor::function(
            "array_agg",
            vec![ParamSpec::Any],
            ReturnSpec::DYNAMIC,
        )
        .with_pattern(1, "array_agg($ ORDER BY row_index)");
        assert!(validate_descriptor(&descriptor).is_empty());
    }

    #[test]
    fn extra_placeholders_are_labeled() {
        let descriptor = OperationDescriptor::function(
            "string_agg",
            vec![ParamSpec::Text, ParamSpec::Text],
            ReturnSpec::Fixed(DataTypeCategory::Text),
        )
        .with_pattern(2, "string_agg($, $ ORDER BY $)");

        let diags = validate_descriptor(&descriptor);
        assert_eq!(codes(&diags), vec!["catalog::placeholder_count"]);
        assert_eq!(diags[0].labels.len(), 1);
        assert_eq!(diags[0].labels[0].span, 25..26);
        assert_eq!(
            diags[0].source.as_ref().map(TemplateSource::name),
            Some("string_agg/2")
        );
    }

    #[test]
    fn missing_placeholders() {
        let descriptor = OperationDescriptor::function(
            "string_agg",
            vec![ParamSpec::Text, ParamSpec::Text],
            ReturnSpec::Fixed(DataTypeCategory::Text),
        )
        .with_pattern(2, "string_agg($ ORDER BY row_index)");

        let diags = validate_descriptor(&descriptor);
        assert_eq!(codes(&diags), vec!["catalog::placeholder_count"]);
        assert_eq!(diags[0].labels[0].message, "1 placeholder(s) missing");
    }

    #[test]
    fn pattern_key_must_match_arity() {
        let descriptor =
            OperationDescriptor::function("max", vec![ParamSpec::Any], ReturnSpec::DYNAMIC)
                .with_pattern(2, "max($, $)");

        let diags = validate_descriptor(&descriptor);
        assert_eq!(codes(&diags), vec!["catalog::pattern_arity"]);
    }

    #[test]
    fn dynamic_without_wildcard() {
        let descriptor =
            OperationDescriptor::function("lower", vec![ParamSpec::Text], ReturnSpec::DYNAMIC);
        let diags = validate_descriptor(&descriptor);
        assert_eq!(codes(&diags), vec!["catalog::unresolvable_return_type"]);
    }

    #[test]
    fn empty_name() {
        let descriptor = OperationDescriptor::function(
            " ",
            vec![],
            ReturnSpec::Fixed(DataTypeCategory::Numeric),
        );
        assert_eq!(
            codes(&validate_descriptor(&descriptor)),
            vec!["catalog::empty_name"]
        );
    }

    #[test]
    fn dynamic_index_past_arity() {
        let descriptor = OperationDescriptor::function(
            "nullif",
            vec![ParamSpec::Any, ParamSpec::Any],
            ReturnSpec::Dynamic(Some(2)),
        );
        let diags = validate_descriptor(&descriptor);
        assert_eq!(codes(&diags), vec!["catalog::unresolvable_return_type"]);

        let in_range = OperationDescriptor::function(
            "nullif",
            vec![ParamSpec::Any, ParamSpec::Any],
            ReturnSpec::Dynamic(Some(1)),
        );
        assert!(validate_descriptor(&in_range).is_empty());
    }

    #[test]
    fn fully_disabled_family_warns() {
        let catalog: Catalog = [
            OperationDescriptor::function(
                "string_agg",
                vec![ParamSpec::Text, ParamSpec::Text],
                ReturnSpec::Fixed(DataTypeCategory::Text),
            )
            .aggregation()
            .disabled()
            .with_comment("concatenation order is unspecified"),
            OperationDescriptor::function(
                "upper",
                vec![ParamSpec::Text],
                ReturnSpec::Fixed(DataTypeCategory::Text),
            ),
        ]
        .into_iter()
        .collect();

        let diags = validate_families(&catalog);
        assert_eq!(codes(&diags), vec!["catalog::never_enabled"]);
        assert!(!diags[0].is_error());
        assert_eq!(diags[0].notes, vec!["concatenation order is unspecified"]);
    }

    #[test]
    fn family_with_enabled_variant_is_quiet() {
        let catalog: Catalog = [
            OperationDescriptor::function("max", vec![ParamSpec::Any], ReturnSpec::DYNAMIC)
                .disabled(),
            OperationDescriptor::function("max", vec![ParamSpec::Any], ReturnSpec::DYNAMIC)
                .with_pattern(1, "max($ ORDER BY row_index)"),
        ]
        .into_iter()
        .collect();
        assert!(validate_families(&catalog).is_empty());
    }

    #[test]
    fn operator_with_pattern_for_other_arity() {
        let descriptor = OperationDescriptor::operator(
            "-",
            "-$",
            vec![ParamSpec::NUMERIC],
            ReturnSpec::Fixed(DataTypeCategory::Numeric),
        )
        .with_pattern(2, "$ - $");
        let diags = validate_descriptor(&descriptor);
        assert_eq!(codes(&diags), vec!["catalog::pattern_arity"]);
    }
}
