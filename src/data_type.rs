//! Data type categories consumed by the catalog.
//!
//! This is the narrow slice of a SQL type system the catalog needs: category
//! identity, equality, and a subtype test for coercion-aware parameter
//! acceptance.

use std::fmt;

/// Family a concrete SQL type belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataTypeCategory {
    /// `boolean`.
    Boolean,

    /// Any numeric type (integer, floating, decimal).
    Numeric,

    /// Integer-only numeric subtype.
    Integer,

    /// Floating point numeric subtype.
    Float,

    /// `text` and other string types.
    Text,

    /// Array with the given element category.
    Array(Box<DataTypeCategory>),

    /// Placeholder resolved from arguments.
    Dynamic,
}

impl DataTypeCategory {
    /// Shorthand for `Array(Box::new(element))`.
    pub fn array_of(element: DataTypeCategory) -> Self {
        DataTypeCategory::Array(Box::new(element))
    }

    /// Returns true if this category is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, DataTypeCategory::Array(_))
    }

    /// Returns true if a value of this category may be used where `other` is expected.
    ///
    /// Every category is a subtype of itself; `Integer` and `Float` are subtypes of
    /// `Numeric`; arrays are covariant in their element.
    pub fn is_subtype_of(&self, other: &DataTypeCategory) -> bool {
        match (self, other) {
            (a, b) if a == b => true,
            (DataTypeCategory::Integer | DataTypeCategory::Float, DataTypeCategory::Numeric) => {
                true
            }
            (DataTypeCategory::Array(a), DataTypeCategory::Array(b)) => a.is_subtype_of(b),
            _ => false,
        }
    }
}

impl fmt::Display for DataTypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTypeCategory::Boolean => write!(f, "boolean"),
            DataTypeCategory::Numeric => write!(f, "numeric"),
            DataTypeCategory::Integer => write!(f, "integer"),
            DataTypeCategory::Float => write!(f, "double precision"),
            DataTypeCategory::Text => write!(f, "text"),
            DataTypeCategory::Array(element) => write!(f, "{element}[]"),
            DataTypeCategory::Dynamic => write!(f, "dynamic"),
        }
    }
}
