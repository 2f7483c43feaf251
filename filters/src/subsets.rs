//! Category subsets to filter clauses, filter groups and active filter chips.

use std::collections::HashSet;

use common::category_subset::{CategorySubsetClause, SubsetCriteria, SubsetOperator, VerticalSubsetDto};
use common::filter_request::{FilterClause, FilterGroup, FilterRequest};

use crate::merge::{collapse_filters, merge_filters_without_duplicates};


/// Converts each criterion on its own. Criteria that cannot be expressed are left out.
pub fn convert_subset_criteria_to_filters(subset: &VerticalSubsetDto) -> Vec<FilterClause> {
    subset.criterias.iter().filter_map(convert_criteria).collect()
}

/// Same as [`convert_subset_criteria_to_filters`] but without the criterion at `removed_index`.
pub fn get_remaining_subset_filters(subset: Option<&VerticalSubsetDto>, removed_index: usize) -> Vec<FilterClause> {
    let Some(subset) = subset else {
        return Vec::new();
    };

    subset
        .criterias
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != removed_index)
        .filter_map(|(_, criteria)| convert_criteria(criteria))
        .collect()
}

pub fn convert_criteria(criteria: &SubsetCriteria) -> Option<FilterClause> {
    let field = criteria.field.as_deref().filter(|field| !field.is_empty())?;
    let operator = criteria.operator?;

    match operator {
        SubsetOperator::Equals => {
            let value = criteria.value.as_deref().filter(|value| !value.is_empty())?;
            Some(FilterClause::term(field, [value]))
        }
        SubsetOperator::LowerThan => {
            let max = parse_numeric_value(criteria.value.as_deref())?;
            Some(FilterClause::range(field, None, Some(max)))
        }
        SubsetOperator::GreaterThan => {
            let min = parse_numeric_value(criteria.value.as_deref())?;
            Some(FilterClause::range(field, Some(min), None))
        }
        SubsetOperator::Unknown => None,
    }
}

/// Reads the leading decimal number of `value` ("12.5 €" is 12.5). Non-finite results are rejected.
fn parse_numeric_value(value: Option<&str>) -> Option<f64> {
    let value = value?.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        end += 1 + fraction_digits;
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end.min(bytes.len())..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    value[..end].parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}


/// Resolves the active subset ids into one `should` group per subset group.
///
/// Unknown and repeated ids are ignored. Subsets without a group form their own group.
pub fn build_filter_request_from_subsets(subsets: &[VerticalSubsetDto], active_subset_ids: &[String]) -> FilterRequest {
    let mut groups: Vec<(String, Vec<FilterClause>)> = Vec::new();

    for subset in resolve_active_subsets(subsets, active_subset_ids) {
        // the clauses of one subset must hold together inside an OR group
        let filters = collapse_filters(&convert_subset_criteria_to_filters(subset));
        if filters.is_empty() {
            continue;
        }

        let group_key = subset.group.clone().unwrap_or_else(|| subset.id.clone());
        match groups.iter_mut().find(|(key, _)| *key == group_key) {
            Some((_, current)) => *current = merge_filters_without_duplicates(current, &filters),
            None => groups.push((group_key, filters)),
        }
    }

    FilterRequest {
        filters: Vec::new(),
        filter_groups: groups.into_iter().map(|(_, clauses)| FilterGroup::should(clauses)).collect(),
    }
}

/// One chip per convertible criterion of every active subset, in activation order.
pub fn build_subset_clauses(subsets: &[VerticalSubsetDto], active_subset_ids: &[String]) -> Vec<CategorySubsetClause> {
    let mut clauses = Vec::new();

    for subset in resolve_active_subsets(subsets, active_subset_ids) {
        let label = subset
            .caption
            .clone()
            .or_else(|| subset.title.clone())
            .unwrap_or_else(|| subset.id.clone());

        for (index, criteria) in subset.criterias.iter().enumerate() {
            if let Some(filter) = convert_criteria(criteria) {
                clauses.push(CategorySubsetClause {
                    id: format!("{}-{}", subset.id, index),
                    subset_id: subset.id.clone(),
                    index,
                    label: label.clone(),
                    filter,
                });
            }
        }
    }

    clauses
}

fn resolve_active_subsets<'a>(subsets: &'a [VerticalSubsetDto], active_subset_ids: &[String]) -> Vec<&'a VerticalSubsetDto> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for subset_id in active_subset_ids {
        let Some(subset) = subsets.iter().find(|candidate| candidate.id == *subset_id) else {
            tracing::debug!("Ignoring unknown active subset: {}", subset_id);
            continue;
        };
        if seen.insert(subset.id.as_str()) {
            resolved.push(subset);
        }
    }

    resolved
}
