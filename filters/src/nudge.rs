//! Filter request assembly for the nudge tool.

use common::filter_request::{FilterClause, FilterGroup, FilterRequest};
use serde::{Deserialize, Serialize};

use crate::merge::merge_filters_without_duplicates;


/// A subset contribution: either a plain clause or a boolean group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubsetFilter {
    Clause(FilterClause),
    Group(FilterGroup),
}

impl From<FilterClause> for SubsetFilter {
    fn from(value: FilterClause) -> Self {
        SubsetFilter::Clause(value)
    }
}

impl From<FilterGroup> for SubsetFilter {
    fn from(value: FilterGroup) -> Self {
        SubsetFilter::Group(value)
    }
}


/// Base filters, then the condition filter, then score filters, then subset clauses,
/// each step skipping clauses already present. Subset groups are passed through unchanged
/// and in order, empty ones included.
///
/// An entirely empty result serializes as `{}`.
pub fn build_nudge_filter_request(
    base_filters: &[FilterClause],
    condition_filter: Option<&FilterClause>,
    score_filters: &[FilterClause],
    subset_filters: &[SubsetFilter],
) -> FilterRequest {
    let mut filters = match condition_filter {
        Some(condition) => merge_filters_without_duplicates(base_filters, std::slice::from_ref(condition)),
        None => base_filters.to_vec(),
    };
    filters = merge_filters_without_duplicates(&filters, score_filters);

    let mut subset_clauses = Vec::new();
    let mut filter_groups = Vec::new();
    for entry in subset_filters {
        match entry {
            SubsetFilter::Clause(clause) => subset_clauses.push(clause.clone()),
            SubsetFilter::Group(group) => filter_groups.push(group.clone()),
        }
    }
    filters = merge_filters_without_duplicates(&filters, &subset_clauses);

    FilterRequest { filters, filter_groups }
}
