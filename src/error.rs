//! Catalog construction and resolution errors.
//!
//! An inapplicable descriptor or an empty lookup is not an error; those are
//! expressed as `false`, `None`, or an empty slice. Everything here is a bug
//! in how the catalog was put together, or in how a caller drives it.

use crate::diag::{Diag, convert_diagnostics_to_reports};
use miette::{Diagnostic, Report};
use smol_str::SmolStr;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for catalog construction bugs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CatalogError {
    /// The return spec has no defined outcome for an applicable argument list.
    #[error("return type of '{name}/{arity}' cannot be resolved for ({args})")]
    #[diagnostic(
        code(catalog::unresolvable_return_type),
        help("a sourceless dynamic return needs an `any` parameter; an explicit source index must be below the arity")
    )]
    UnresolvableReturnType {
        name: SmolStr,
        arity: usize,
        args: String,
    },

    /// A custom pattern's placeholder count differs from the argument count.
    #[error(
        "pattern '{pattern}' of '{name}' has {placeholders} placeholder(s) but was given {arguments} argument(s)"
    )]
    #[diagnostic(code(catalog::placeholder_count))]
    PlaceholderMismatch {
        name: SmolStr,
        pattern: SmolStr,
        placeholders: usize,
        arguments: usize,
    },

    /// An operator has no pattern to render the requested arity with.
    #[error("operator '{name}' has no rendering pattern for arity {arity}")]
    #[diagnostic(
        code(catalog::missing_operator_pattern),
        help("operators have no default `name(args)` form; register a pattern for their arity")
    )]
    MissingOperatorPattern { name: SmolStr, arity: usize },

    /// A caller passed a different number of argument expressions than argument types.
    #[error("'{name}' was resolved with {types} argument type(s) but {expressions} argument expression(s)")]
    #[diagnostic(code(catalog::argument_count))]
    ArgumentCountMismatch {
        name: SmolStr,
        types: usize,
        expressions: usize,
    },

    /// Startup validation found one or more malformed descriptors.
    #[error("catalog validation failed with {} problem(s)", .diagnostics.len())]
    #[diagnostic(
        code(catalog::invalid),
        help("every descriptor is checked at startup; fix the listed descriptors before running")
    )]
    Invalid { diagnostics: Vec<Diag> },
}

impl CatalogError {
    /// Returns the validation diagnostics carried by [`CatalogError::Invalid`].
    pub fn diagnostics(&self) -> &[Diag] {
        match self {
            CatalogError::Invalid { diagnostics } => diagnostics,
            _ => &[],
        }
    }

    /// Renders the carried validation diagnostics as miette reports, with the
    /// offending template attached as source where there is one.
    pub fn reports(&self) -> Vec<Report> {
        convert_diagnostics_to_reports(self.diagnostics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_descriptor() {
        let err = CatalogError::PlaceholderMismatch {
            name: "string_agg".into(),
            pattern: "string_agg($ ORDER BY row_index)".into(),
            placeholders: 1,
            arguments: 2,
        };
        assert_eq!(
            err.to_string(),
            "pattern 'string_agg($ ORDER BY row_index)' of 'string_agg' has 1 placeholder(s) but was given 2 argument(s)"
        );

        let err = CatalogError::UnresolvableReturnType {
            name: "max".into(),
            arity: 1,
            args: "text".into(),
        };
        assert_eq!(
            err.to_string(),
            "return type of 'max/1' cannot be resolved for (text)"
        );
    }

    #[test]
    fn invalid_counts_problems() {
        let err = CatalogError::Invalid {
            diagnostics: vec![Diag::error("a"), Diag::error("b")],
        };
        assert_eq!(err.to_string(), "catalog validation failed with 2 problem(s)");
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.reports().len(), 2);
    }

    #[test]
    fn diagnostic_codes() {
        let err = CatalogError::MissingOperatorPattern {
            name: "+".into(),
            arity: 2,
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("catalog::missing_operator_pattern"));
        assert!(err.diagnostics().is_empty());
    }
}
