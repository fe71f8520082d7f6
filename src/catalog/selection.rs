//! Run configuration for picking catalog subsets.

use crate::operation::{OperationDescriptor, Relevance};
use smol_str::SmolStr;

/// How aggregation descriptors are treated by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationFilter {
    /// Aggregations and scalar operations alike.
    #[default]
    Include,
    /// Scalar operations only.
    Exclude,
    /// Aggregations only.
    Only,
}

/// Which descriptors a test run draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSelection {
    /// Also select descriptors registered as disabled.
    pub include_disabled: bool,

    /// Lowest relevance tier to select.
    pub min_relevance: Relevance,

    /// Aggregation handling.
    pub aggregations: AggregationFilter,

    /// If set, only these operation names are selected.
    pub names: Option<Vec<SmolStr>>,
}

impl Default for OperationSelection {
    fn default() -> Self {
        Self {
            include_disabled: false,
            min_relevance: Relevance::Low,
            aggregations: AggregationFilter::Include,
            names: None,
        }
    }
}

impl OperationSelection {
    /// Selection with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether disabled descriptors are selected.
    pub fn with_disabled(mut self, include_disabled: bool) -> Self {
        self.include_disabled = include_disabled;
        self
    }

    /// Sets the lowest relevance tier to select.
    pub fn with_min_relevance(mut self, min_relevance: Relevance) -> Self {
        self.min_relevance = min_relevance;
        self
    }

    /// Sets aggregation handling.
    pub fn with_aggregations(mut self, aggregations: AggregationFilter) -> Self {
        self.aggregations = aggregations;
        self
    }

    /// Restricts the selection to the given names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `descriptor` belongs to this selection.
    pub fn matches(&self, descriptor: &OperationDescriptor) -> bool {
        if !self.include_disabled && !descriptor.is_enabled() {
            return false;
        }
        if descriptor.relevance() < self.min_relevance {
            return false;
        }
        let aggregation_ok = match self.aggregations {
            AggregationFilter::Include => true,
            AggregationFilter::Exclude => !descriptor.is_aggregation(),
            AggregationFilter::Only => descriptor.is_aggregation(),
        };
        if !aggregation_ok {
            return false;
        }
        match &self.names {
            Some(names) => names.iter().any(|name| name == descriptor.name()),
            None => true,
        }
    }
}
