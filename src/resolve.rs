//! Resolution of descriptors against concrete argument assignments.
//!
//! The generator samples argument categories and SQL expressions; this module
//! decides whether a descriptor applies, what type the call produces, and how
//! it is spelled. Nothing is retained between calls.

use crate::catalog::Catalog;
use crate::data_type::DataTypeCategory;
use crate::error::{CatalogError, CatalogResult};
use crate::operation::OperationDescriptor;
use std::fmt;

/// A rendered call together with its expected result category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation<'c> {
    /// The descriptor that was resolved.
    pub descriptor: &'c OperationDescriptor,
    /// SQL text of the call.
    pub sql: String,
    /// Result category the comparison harness should expect.
    pub return_type: DataTypeCategory,
}

impl fmt::Display for ResolvedOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.sql, self.return_type)
    }
}

/// Resolves one descriptor.
///
/// Returns `Ok(None)` when the descriptor does not accept `arg_types`, which
/// is the expected outcome for most sampled assignments. `arg_exprs` must hold
/// one SQL expression per argument type.
pub fn resolve<'c, S: AsRef<str>>(
    descriptor: &'c OperationDescriptor,
    arg_types: &[DataTypeCategory],
    arg_exprs: &[S],
) -> CatalogResult<Option<ResolvedOperation<'c>>> {
    if arg_types.len() != arg_exprs.len() {
        return Err(CatalogError::ArgumentCountMismatch {
            name: descriptor.name().into(),
            types: arg_types.len(),
            expressions: arg_exprs.len(),
        });
    }

    if !descriptor.is_applicable(arg_types) {
        tracing::trace!(operation = descriptor.name(), "not applicable");
        return Ok(None);
    }

    let return_type = descriptor.resolve_return_type(arg_types)?;
    let sql = descriptor.render(arg_exprs)?;
    tracing::debug!(
        operation = descriptor.name(),
        %return_type,
        sql = %sql,
        "resolved operation"
    );

    Ok(Some(ResolvedOperation {
        descriptor,
        sql,
        return_type,
    }))
}

/// Resolves every overload named `name`, in registration order, skipping
/// those that do not apply.
pub fn resolve_overloads<'c, S: AsRef<str>>(
    catalog: &'c Catalog,
    name: &str,
    arg_types: &[DataTypeCategory],
    arg_exprs: &[S],
) -> CatalogResult<Vec<ResolvedOperation<'c>>> {
    let mut resolved = Vec::new();
    for descriptor in catalog.lookup_by_name(name) {
        if let Some(operation) = resolve(descriptor, arg_types, arg_exprs)? {
            resolved.push(operation);
        }
    }
    Ok(resolved)
}
