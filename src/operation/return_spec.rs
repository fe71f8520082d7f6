//! Return type specifications.

use super::param::ParamSpec;
use crate::data_type::DataTypeCategory;
use std::fmt;

/// How an operation's result category is computed from its argument categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnSpec {
    /// Always the given category.
    Fixed(DataTypeCategory),

    /// Mirrors an argument: the one at the given index, or without an index the
    /// first wildcard (`Any`) slot in declaration order.
    Dynamic(Option<usize>),

    /// Integer-only numeric result regardless of argument subtypes.
    NumericOnlyInteger,

    /// Array of the given element category; a `Dynamic` element is resolved the
    /// same way as [`ReturnSpec::Dynamic`] with no index.
    ArrayOf(DataTypeCategory),
}

impl ReturnSpec {
    /// A `Dynamic` return mirroring the first wildcard slot.
    pub const DYNAMIC: ReturnSpec = ReturnSpec::Dynamic(None);

    /// Resolves the result category.
    ///
    /// `args` must already be accepted by `params`. Returns `None` only for a
    /// spec that cannot work with these parameters at all (a sourceless
    /// `Dynamic` without a wildcard slot, or an index past the arity).
    pub fn resolve(
        &self,
        params: &[ParamSpec],
        args: &[DataTypeCategory],
    ) -> Option<DataTypeCategory> {
        match self {
            ReturnSpec::Fixed(category) => Some(category.clone()),
            ReturnSpec::Dynamic(source) => mirrored_argument(*source, params, args).cloned(),
            ReturnSpec::NumericOnlyInteger => Some(DataTypeCategory::Integer),
            ReturnSpec::ArrayOf(DataTypeCategory::Dynamic) => mirrored_argument(None, params, args)
                .cloned()
                .map(DataTypeCategory::array_of),
            ReturnSpec::ArrayOf(element) => Some(DataTypeCategory::array_of(element.clone())),
        }
    }
}

fn mirrored_argument<'a>(
    source: Option<usize>,
    params: &[ParamSpec],
    args: &'a [DataTypeCategory],
) -> Option<&'a DataTypeCategory> {
    let index = match source {
        Some(index) => index,
        None => params.iter().position(ParamSpec::is_wildcard)?,
    };
    args.get(index)
}

impl fmt::Display for ReturnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnSpec::Fixed(category) => write!(f, "{category}"),
            ReturnSpec::Dynamic(None) => write!(f, "dynamic"),
            ReturnSpec::Dynamic(Some(index)) => write!(f, "typeof(${})", index + 1),
            ReturnSpec::NumericOnlyInteger => write!(f, "integer"),
            ReturnSpec::ArrayOf(element) => write!(f, "{element}[]"),
        }
    }
}
