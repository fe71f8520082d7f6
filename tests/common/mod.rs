//! Shared helpers for integration tests.
//!
//! - [`catalog`] builds the builtin catalog, panicking with rendered
//!   diagnostics if it fails validation
//! - [`sample_categories`] lists argument categories to sweep over
//! - [`names`] extracts descriptor names for order assertions

#![allow(dead_code)]

use consistency_catalog::{
    Catalog, CatalogError, DataTypeCategory, OperationDescriptor, build_catalog,
};

/// Format validation diagnostics for assertion messages.
pub fn format_reports(err: &CatalogError) -> String {
    err.reports()
        .iter()
        .map(|report| format!("{report:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the builtin catalog.
///
/// # Panics
/// Panics if the catalog fails validation, printing every diagnostic.
pub fn catalog() -> Catalog {
    match build_catalog() {
        Ok(catalog) => catalog,
        Err(err) => panic!("builtin catalog is invalid: {err}\n{}", format_reports(&err)),
    }
}

/// Argument categories covering every family, including arrays and `Dynamic`.
pub fn sample_categories() -> Vec<DataTypeCategory> {
    vec![
        DataTypeCategory::Boolean,
        DataTypeCategory::Numeric,
        DataTypeCategory::Integer,
        DataTypeCategory::Float,
        DataTypeCategory::Text,
        DataTypeCategory::array_of(DataTypeCategory::Integer),
        DataTypeCategory::array_of(DataTypeCategory::Text),
        DataTypeCategory::Dynamic,
    ]
}

/// Every argument-category list of length `arity` drawn from [`sample_categories`].
pub fn assignments(arity: usize) -> Vec<Vec<DataTypeCategory>> {
    let mut lists = vec![Vec::new()];
    for _ in 0..arity {
        lists = lists
            .into_iter()
            .flat_map(|prefix| {
                sample_categories().into_iter().map(move |category| {
                    let mut next = prefix.clone();
                    next.push(category);
                    next
                })
            })
            .collect();
    }
    lists
}

/// Names of the given descriptors, in order.
pub fn names(descriptors: &[&OperationDescriptor]) -> Vec<String> {
    descriptors.iter().map(|d| d.name().to_string()).collect()
}
