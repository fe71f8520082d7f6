//! Operation catalog and return-type resolution for differential SQL testing.
//!
//! A consistency test generates SQL expressions from a catalog of operation
//! descriptors, evaluates them through several execution paths, and flags
//! diverging results. This crate holds the catalog side of that: descriptors
//! with polymorphic parameter and return contracts, the catalog itself, and
//! resolution of a descriptor against a concrete argument assignment.
//!
//! # Example
//!
//! ```
//! use consistency_catalog::{DataTypeCategory, build_catalog, resolve};
//!
//! let catalog = build_catalog().expect("builtin catalog is valid");
//!
//! // Both string_agg variants are registered; only one of them orders its input.
//! let variants = catalog.lookup_by_name("string_agg");
//! assert_eq!(variants.len(), 2);
//!
//! let resolved = resolve(
//!     variants[1],
//!     &[DataTypeCategory::Text, DataTypeCategory::Text],
//!     &["a", "','"],
//! )
//! .unwrap()
//! .expect("string_agg accepts two text arguments");
//! assert_eq!(resolved.sql, "string_agg(a, ',' ORDER BY row_index)");
//! assert_eq!(resolved.return_type, DataTypeCategory::Text);
//! ```

pub mod catalog;
pub mod data_type;
pub mod diag;
pub mod error;
pub mod operation;
pub mod pattern;
pub mod resolve;
pub mod span;

pub use catalog::{AggregationFilter, Catalog, OperationSelection, build_catalog};
pub use data_type::DataTypeCategory;
pub use diag::{Diag, DiagLabel, DiagSeverity, TemplateSource};
pub use error::{CatalogError, CatalogResult};
pub use operation::{OperationDescriptor, OperationKind, ParamSpec, Relevance, ReturnSpec};
pub use pattern::PatternTemplate;
pub use resolve::{ResolvedOperation, resolve, resolve_overloads};
pub use span::{Span, Spanned};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_accessible() {
        let _span: Span = 0..5;
        let _spanned = Spanned::new(ParamSpec::Any, 0..5);
        let _selection = OperationSelection::default();
    }
}
