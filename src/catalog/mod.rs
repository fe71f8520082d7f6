//! The operation catalog.
//!
//! The catalog owns every registered [`OperationDescriptor`] in registration
//! order, plus a name index so that all overloads sharing a name can be found
//! without a scan. It is populated once, validated, and then only read.
//!
//! # Example
//!
//! ```
//! use consistency_catalog::catalog::build_catalog;
//! use consistency_catalog::DataTypeCategory;
//!
//! let catalog = build_catalog().expect("builtin catalog is valid");
//! let max = catalog.lookup_by_name("max")[0];
//! assert_eq!(
//!     max.resolve_return_type(&[DataTypeCategory::Text]).unwrap(),
//!     DataTypeCategory::Text
//! );
//! assert_eq!(max.render(&["x"]).unwrap(), "max(x)");
//! ```

pub mod builtin;
pub mod selection;
pub mod validate;

pub use builtin::build_catalog;
pub use selection::{AggregationFilter, OperationSelection};

use crate::diag::Diag;
use crate::error::{CatalogError, CatalogResult};
use crate::operation::OperationDescriptor;
use smol_str::SmolStr;
use std::collections::HashMap;

/// Ordered collection of operation descriptors with lookup by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: Vec<OperationDescriptor>,
    by_name: HashMap<SmolStr, Vec<usize>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor. Names need not be unique; same-named descriptors
    /// form an overload family.
    pub fn register(&mut self, descriptor: OperationDescriptor) {
        tracing::debug!(
            operation = descriptor.name(),
            arity = descriptor.arity(),
            aggregation = descriptor.is_aggregation(),
            "registering operation"
        );
        let index = self.descriptors.len();
        self.by_name
            .entry(SmolStr::new(descriptor.name()))
            .or_default()
            .push(index);
        self.descriptors.push(descriptor);
    }

    /// All descriptors named `name`, in registration order. Empty if none match.
    pub fn lookup_by_name(&self, name: &str) -> Vec<&OperationDescriptor> {
        self.by_name
            .get(name)
            .map(|indices| indices.iter().map(|&i| &self.descriptors[i]).collect())
            .unwrap_or_default()
    }

    /// Descriptors matching `predicate`, in registration order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&OperationDescriptor>
    where
        P: FnMut(&OperationDescriptor) -> bool,
    {
        self.descriptors.iter().filter(|d| predicate(d)).collect()
    }

    /// Descriptors belonging to a run's [`OperationSelection`].
    pub fn select(&self, selection: &OperationSelection) -> Vec<&OperationDescriptor> {
        self.filter(|descriptor| selection.matches(descriptor))
    }

    /// All aggregation descriptors.
    pub fn aggregations(&self) -> Vec<&OperationDescriptor> {
        self.filter(OperationDescriptor::is_aggregation)
    }

    /// Distinct operation names in order of first registration.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.by_name.len());
        for descriptor in &self.descriptors {
            if !names.contains(&descriptor.name()) {
                names.push(descriptor.name());
            }
        }
        names
    }

    /// Iterates over all descriptors in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, OperationDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Every problem found in the catalog, errors and warnings alike.
    pub fn diagnostics(&self) -> Vec<Diag> {
        let mut diagnostics: Vec<Diag> = self
            .descriptors
            .iter()
            .flat_map(validate::validate_descriptor)
            .collect();
        diagnostics.extend(validate::validate_families(self));
        diagnostics
    }

    /// Checks every descriptor for internal consistency.
    ///
    /// Fails with [`CatalogError::Invalid`] listing every problem found. Only
    /// error-severity diagnostics fail validation; warnings are logged.
    pub fn validate(&self) -> CatalogResult<()> {
        let diagnostics = self.diagnostics();
        if diagnostics.iter().any(Diag::is_error) {
            return Err(CatalogError::Invalid { diagnostics });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a OperationDescriptor;
    type IntoIter = std::slice::Iter<'a, OperationDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<OperationDescriptor> for Catalog {
    fn from_iter<I: IntoIterator<Item = OperationDescriptor>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for descriptor in iter {
            catalog.register(descriptor);
        }
        catalog
    }
}
