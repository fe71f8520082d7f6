//! Builtin operation registrations.
//!
//! Operations are grouped by the category they mostly work on. Registration
//! order is part of the catalog's observable behavior (lookups and filters
//! preserve it), so new entries go next to their relatives rather than at the
//! end.

use super::Catalog;
use crate::data_type::DataTypeCategory;
use crate::error::CatalogResult;
use crate::operation::{OperationDescriptor, ParamSpec, Relevance, ReturnSpec};

/// Builds and validates the builtin catalog.
///
/// Called once at startup; the result is passed to the generator and the
/// comparison harness explicitly.
pub fn build_catalog() -> CatalogResult<Catalog> {
    let catalog: Catalog = builtin_operations().collect();
    catalog.validate()?;
    tracing::info!(
        operations = catalog.len(),
        names = catalog.names().len(),
        "built operation catalog"
    );
    Ok(catalog)
}

/// Every builtin descriptor in registration order.
pub fn builtin_operations() -> impl Iterator<Item = OperationDescriptor> {
    aggregate_operations()
        .into_iter()
        .chain(numeric_operations())
        .chain(text_operations())
        .chain(boolean_operations())
        .chain(generic_operations())
}

fn fixed(category: DataTypeCategory) -> ReturnSpec {
    ReturnSpec::Fixed(category)
}

fn numeric_aggregate(name: &str, relevance: Relevance) -> OperationDescriptor {
    OperationDescriptor::function(name, vec![ParamSpec::NUMERIC], fixed(DataTypeCategory::Numeric))
        .aggregation()
        .with_relevance(relevance)
}

/// Aggregate functions.
pub fn aggregate_operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::function(
            "array_agg",
            vec![ParamSpec::Any],
            ReturnSpec::ArrayOf(DataTypeCategory::Dynamic),
        )
        .aggregation()
        .disabled()
        .with_comment("element order is unspecified without ORDER BY"),
        // Typed as an array of the element, like the unordered variant.
        OperationDescriptor::function(
            "array_agg",
            vec![ParamSpec::Any],
            ReturnSpec::ArrayOf(DataTypeCategory::Dynamic),
        )
        .with_pattern(1, "array_agg($ ORDER BY row_index)")
        .aggregation(),
        numeric_aggregate("avg", Relevance::High),
        numeric_aggregate("avg_internal_v1", Relevance::High),
        OperationDescriptor::function(
            "bool_and",
            vec![ParamSpec::Boolean],
            fixed(DataTypeCategory::Boolean),
        )
        .aggregation()
        .with_relevance(Relevance::Low),
        OperationDescriptor::function(
            "bool_or",
            vec![ParamSpec::Boolean],
            fixed(DataTypeCategory::Boolean),
        )
        .aggregation()
        .with_relevance(Relevance::Low),
        OperationDescriptor::function("count", vec![ParamSpec::Any], ReturnSpec::NumericOnlyInteger)
            .aggregation()
            .with_relevance(Relevance::High),
        OperationDescriptor::function("max", vec![ParamSpec::Any], ReturnSpec::DYNAMIC)
            .aggregation()
            .with_relevance(Relevance::High),
        OperationDescriptor::function("min", vec![ParamSpec::Any], ReturnSpec::DYNAMIC)
            .aggregation()
            .with_relevance(Relevance::High),
        numeric_aggregate("stddev_pop", Relevance::Low),
        numeric_aggregate("stddev_samp", Relevance::Low).with_comment("same as stddev"),
        numeric_aggregate("sum", Relevance::High),
        numeric_aggregate("var_pop", Relevance::Low),
        numeric_aggregate("var_samp", Relevance::Low).with_comment("same as variance"),
        OperationDescriptor::function(
            "string_agg",
            vec![ParamSpec::Text, ParamSpec::Text],
            fixed(DataTypeCategory::Text),
        )
        .aggregation()
        .with_relevance(Relevance::Low)
        .disabled()
        .with_comment("concatenation order is unspecified without ORDER BY"),
        OperationDescriptor::function(
            "string_agg",
            vec![ParamSpec::Text, ParamSpec::Text],
            fixed(DataTypeCategory::Text),
        )
        .with_pattern(2, "string_agg($, $ ORDER BY row_index)")
        .aggregation()
        .with_relevance(Relevance::Low),
    ]
}

fn numeric_binary_operator(name: &str, pattern: &str, relevance: Relevance) -> OperationDescriptor {
    OperationDescriptor::operator(
        name,
        pattern,
        vec![ParamSpec::NUMERIC, ParamSpec::NUMERIC],
        fixed(DataTypeCategory::Numeric),
    )
    .with_relevance(relevance)
}

fn numeric_unary_function(name: &str, relevance: Relevance) -> OperationDescriptor {
    OperationDescriptor::function(name, vec![ParamSpec::NUMERIC], fixed(DataTypeCategory::Numeric))
        .with_relevance(relevance)
}

/// Arithmetic operators and numeric functions.
pub fn numeric_operations() -> Vec<OperationDescriptor> {
    vec![
        numeric_binary_operator("+", "$ + $", Relevance::High),
        numeric_binary_operator("-", "$ - $", Relevance::High),
        numeric_binary_operator("*", "$ * $", Relevance::High),
        numeric_binary_operator("/", "$ / $", Relevance::High),
        numeric_binary_operator("%", "$ % $", Relevance::Default),
        OperationDescriptor::operator(
            "-",
            "-($)",
            vec![ParamSpec::NUMERIC],
            fixed(DataTypeCategory::Numeric),
        ),
        OperationDescriptor::operator(
            "&",
            "$ & $",
            vec![ParamSpec::INTEGER, ParamSpec::INTEGER],
            ReturnSpec::NumericOnlyInteger,
        )
        .with_relevance(Relevance::Low),
        OperationDescriptor::operator(
            "|",
            "$ | $",
            vec![ParamSpec::INTEGER, ParamSpec::INTEGER],
            ReturnSpec::NumericOnlyInteger,
        )
        .with_relevance(Relevance::Low),
        numeric_unary_function("abs", Relevance::High),
        numeric_unary_function("ceil", Relevance::Default),
        numeric_unary_function("floor", Relevance::Default),
        numeric_unary_function("round", Relevance::Default),
        OperationDescriptor::function(
            "round",
            vec![ParamSpec::NUMERIC, ParamSpec::INTEGER],
            fixed(DataTypeCategory::Numeric),
        ),
        numeric_unary_function("trunc", Relevance::Default),
        numeric_unary_function("sqrt", Relevance::Default),
        numeric_unary_function("cbrt", Relevance::Low),
        numeric_unary_function("exp", Relevance::Low),
        numeric_unary_function("ln", Relevance::Low),
        numeric_unary_function("log10", Relevance::Low),
        OperationDescriptor::function(
            "log",
            vec![ParamSpec::NUMERIC, ParamSpec::NUMERIC],
            fixed(DataTypeCategory::Numeric),
        )
        .with_relevance(Relevance::Low),
        OperationDescriptor::function(
            "power",
            vec![ParamSpec::NUMERIC, ParamSpec::NUMERIC],
            fixed(DataTypeCategory::Numeric),
        ),
        OperationDescriptor::function(
            "mod",
            vec![ParamSpec::NUMERIC, ParamSpec::NUMERIC],
            fixed(DataTypeCategory::Numeric),
        )
        .with_relevance(Relevance::Low),
        OperationDescriptor::function(
            "sin",
            vec![ParamSpec::NUMERIC],
            fixed(DataTypeCategory::Float),
        )
        .with_relevance(Relevance::Low),
        OperationDescriptor::function(
            "cos",
            vec![ParamSpec::NUMERIC],
            fixed(DataTypeCategory::Float),
        )
        .with_relevance(Relevance::Low),
    ]
}

/// String functions and operators.
pub fn text_operations() -> Vec<OperationDescriptor> {
    let text = || fixed(DataTypeCategory::Text);
    vec![
        OperationDescriptor::operator(
            "||",
            "$ || $",
            vec![ParamSpec::Text, ParamSpec::Text],
            text(),
        )
        .with_relevance(Relevance::High),
        OperationDescriptor::operator(
            "like",
            "$ LIKE $",
            vec![ParamSpec::Text, ParamSpec::Text],
            fixed(DataTypeCategory::Boolean),
        ),
        OperationDescriptor::function(
            "length",
            vec![ParamSpec::Text],
            ReturnSpec::NumericOnlyInteger,
        )
        .with_relevance(Relevance::High),
        OperationDescriptor::function(
            "bit_length",
            vec![ParamSpec::Text],
            ReturnSpec::NumericOnlyInteger,
        )
        .with_relevance(Relevance::Low),
        OperationDescriptor::function("lower", vec![ParamSpec::Text], text()),
        OperationDescriptor::function("upper", vec![ParamSpec::Text], text()),
        OperationDescriptor::function("btrim", vec![ParamSpec::Text], text()),
        OperationDescriptor::function("btrim", vec![ParamSpec::Text, ParamSpec::Text], text())
            .with_relevance(Relevance::Low),
        OperationDescriptor::function("ltrim", vec![ParamSpec::Text], text())
            .with_relevance(Relevance::Low),
        OperationDescriptor::function("rtrim", vec![ParamSpec::Text], text())
            .with_relevance(Relevance::Low),
        OperationDescriptor::function(
            "replace",
            vec![ParamSpec::Text, ParamSpec::Text, ParamSpec::Text],
            text(),
        ),
        OperationDescriptor::function(
            "substring",
            vec![ParamSpec::Text, ParamSpec::INTEGER],
            text(),
        ),
        OperationDescriptor::function(
            "substring",
            vec![ParamSpec::Text, ParamSpec::INTEGER, ParamSpec::INTEGER],
            text(),
        ),
        OperationDescriptor::function(
            "position",
            vec![ParamSpec::Text, ParamSpec::Text],
            ReturnSpec::NumericOnlyInteger,
        )
        .with_pattern(2, "position($ IN $)")
        .with_relevance(Relevance::Low),
    ]
}

/// Boolean connectives.
pub fn boolean_operations() -> Vec<OperationDescriptor> {
    let boolean = || fixed(DataTypeCategory::Boolean);
    vec![
        OperationDescriptor::operator(
            "and",
            "$ AND $",
            vec![ParamSpec::Boolean, ParamSpec::Boolean],
            boolean(),
        )
        .with_relevance(Relevance::High),
        OperationDescriptor::operator(
            "or",
            "$ OR $",
            vec![ParamSpec::Boolean, ParamSpec::Boolean],
            boolean(),
        )
        .with_relevance(Relevance::High),
        OperationDescriptor::operator("not", "NOT ($)", vec![ParamSpec::Boolean], boolean())
            .with_relevance(Relevance::High),
    ]
}

/// Argument and result categories of the same-category overloads.
///
/// Comparison and selection functions only accept operands of one family, so
/// each is registered once per family rather than over two wildcard slots.
fn comparable_categories() -> [(ParamSpec, DataTypeCategory); 3] {
    [
        (ParamSpec::NUMERIC, DataTypeCategory::Numeric),
        (ParamSpec::Text, DataTypeCategory::Text),
        (ParamSpec::Boolean, DataTypeCategory::Boolean),
    ]
}

fn comparison(name: &str, pattern: &str, relevance: Relevance) -> Vec<OperationDescriptor> {
    comparable_categories()
        .into_iter()
        .map(|(param, _)| {
            OperationDescriptor::operator(
                name,
                pattern,
                vec![param, param],
                fixed(DataTypeCategory::Boolean),
            )
            .with_relevance(relevance)
        })
        .collect()
}

/// One `name(x, .., x)` overload per family, returning that family.
fn same_category_function(
    name: &str,
    arity: usize,
    relevance: Relevance,
) -> Vec<OperationDescriptor> {
    comparable_categories()
        .into_iter()
        .map(|(param, category)| {
            OperationDescriptor::function(name, vec![param; arity], fixed(category))
                .with_relevance(relevance)
        })
        .collect()
}

/// Operations defined over every category.
pub fn generic_operations() -> Vec<OperationDescriptor> {
    let mut operations = Vec::new();
    operations.extend(comparison("=", "$ = $", Relevance::High));
    for (name, pattern) in [
        ("<>", "$ <> $"),
        ("<", "$ < $"),
        ("<=", "$ <= $"),
        (">", "$ > $"),
        (">=", "$ >= $"),
    ] {
        operations.extend(comparison(name, pattern, Relevance::Default));
    }
    operations.push(OperationDescriptor::operator(
        "is_null",
        "($) IS NULL",
        vec![ParamSpec::Any],
        fixed(DataTypeCategory::Boolean),
    ));
    operations.extend(same_category_function("coalesce", 2, Relevance::High));
    operations.extend(same_category_function("coalesce", 3, Relevance::Default));
    operations.extend(same_category_function("nullif", 2, Relevance::Default));
    operations.extend(same_category_function("greatest", 2, Relevance::Default));
    operations.extend(same_category_function("least", 2, Relevance::Default));
    operations.extend(comparable_categories().into_iter().map(|(param, category)| {
        OperationDescriptor::function(
            "case_when",
            vec![ParamSpec::Boolean, param, param],
            fixed(category),
        )
        .with_pattern(3, "CASE WHEN $ THEN $ ELSE $ END")
    }));
    operations.push(
        OperationDescriptor::function(
            "array_length",
            vec![ParamSpec::Array, ParamSpec::INTEGER],
            ReturnSpec::NumericOnlyInteger,
        )
        .with_relevance(Relevance::Low),
    );
    operations
}
