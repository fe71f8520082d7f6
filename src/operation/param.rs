//! Parameter specifications.

use crate::data_type::DataTypeCategory;
use std::fmt;

/// What a formal parameter slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSpec {
    /// Wildcard slot; accepts every category, including `Dynamic`.
    Any,

    /// Accepts `boolean`.
    Boolean,

    /// Accepts `Numeric` and its subtypes, or only `Integer` when `only_integer` is set.
    Numeric { only_integer: bool },

    /// Accepts `text`.
    Text,

    /// Accepts arrays of any element category.
    Array,
}

impl ParamSpec {
    /// A numeric slot accepting every numeric subtype.
    pub const NUMERIC: ParamSpec = ParamSpec::Numeric {
        only_integer: false,
    };

    /// A numeric slot accepting integers only.
    pub const INTEGER: ParamSpec = ParamSpec::Numeric { only_integer: true };

    /// Returns true if an argument of `candidate` category may fill this slot.
    pub fn accepts(&self, candidate: &DataTypeCategory) -> bool {
        match self {
            ParamSpec::Any => true,
            ParamSpec::Boolean => candidate.is_subtype_of(&DataTypeCategory::Boolean),
            ParamSpec::Numeric { only_integer: true } => {
                candidate.is_subtype_of(&DataTypeCategory::Integer)
            }
            ParamSpec::Numeric {
                only_integer: false,
            } => candidate.is_subtype_of(&DataTypeCategory::Numeric),
            ParamSpec::Text => candidate.is_subtype_of(&DataTypeCategory::Text),
            ParamSpec::Array => candidate.is_array(),
        }
    }

    /// Returns true for wildcard slots, the ones a sourceless `Dynamic` return mirrors.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, ParamSpec::Any)
    }

    /// A category this slot accepts.
    pub fn representative(&self) -> DataTypeCategory {
        match self {
            ParamSpec::Any => DataTypeCategory::Dynamic,
            ParamSpec::Boolean => DataTypeCategory::Boolean,
            ParamSpec::Numeric { only_integer: true } => DataTypeCategory::Integer,
            ParamSpec::Numeric {
                only_integer: false,
            } => DataTypeCategory::Numeric,
            ParamSpec::Text => DataTypeCategory::Text,
            ParamSpec::Array => DataTypeCategory::array_of(DataTypeCategory::Dynamic),
        }
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamSpec::Any => write!(f, "any"),
            ParamSpec::Boolean => write!(f, "boolean"),
            ParamSpec::Numeric { only_integer: true } => write!(f, "integer"),
            ParamSpec::Numeric {
                only_integer: false,
            } => write!(f, "numeric"),
            ParamSpec::Text => write!(f, "text"),
            ParamSpec::Array => write!(f, "anyarray"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DataTypeCategory; 6] = [
        DataTypeCategory::Boolean,
        DataTypeCategory::Numeric,
        DataTypeCategory::Integer,
        DataTypeCategory::Float,
        DataTypeCategory::Text,
        DataTypeCategory::Dynamic,
    ];

    #[test]
    fn any_accepts_everything() {
        for category in ALL {
            assert!(ParamSpec::Any.accepts(&category), "{category}");
        }
        assert!(ParamSpec::Any.accepts(&DataTypeCategory::array_of(DataTypeCategory::Text)));
    }

    #[test]
    fn numeric_accepts_subtypes() {
        assert!(ParamSpec::NUMERIC.accepts(&DataTypeCategory::Numeric));
        assert!(ParamSpec::NUMERIC.accepts(&DataTypeCategory::Integer));
        assert!(ParamSpec::NUMERIC.accepts(&DataTypeCategory::Float));
        assert!(!ParamSpec::NUMERIC.accepts(&DataTypeCategory::Text));
        assert!(!ParamSpec::NUMERIC.accepts(&DataTypeCategory::Dynamic));
    }

    #[test]
    fn integer_only() {
        assert!(ParamSpec::INTEGER.accepts(&DataTypeCategory::Integer));
        assert!(!ParamSpec::INTEGER.accepts(&DataTypeCategory::Float));
        assert!(!ParamSpec::INTEGER.accepts(&DataTypeCategory::Numeric));
    }

    #[test]
    fn boolean_rejects_text() {
        assert!(ParamSpec::Boolean.accepts(&DataTypeCategory::Boolean));
        assert!(!ParamSpec::Boolean.accepts(&DataTypeCategory::Text));
        assert!(!ParamSpec::Text.accepts(&DataTypeCategory::Boolean));
    }

    #[test]
    fn array_accepts_any_element() {
        assert!(ParamSpec::Array.accepts(&DataTypeCategory::array_of(DataTypeCategory::Integer)));
        assert!(!ParamSpec::Array.accepts(&DataTypeCategory::Integer));
    }

    #[test]
    fn representative_is_accepted() {
        for spec in [
            ParamSpec::Any,
            ParamSpec::Boolean,
            ParamSpec::NUMERIC,
            ParamSpec::INTEGER,
            ParamSpec::Text,
            ParamSpec::Array,
        ] {
            assert!(spec.accepts(&spec.representative()), "{spec}");
        }
    }
}
