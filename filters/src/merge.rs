//! Structural de-duplication and per-field collapsing of filter clauses.

use common::filter_request::{FilterClause, FilterCondition};


/// Same field, same operator and same values. Term lists compare as sorted lists.
pub fn are_filters_equivalent(left: &FilterClause, right: &FilterClause) -> bool {
    if left.field != right.field {
        return false;
    }

    match (&left.condition, &right.condition) {
        (FilterCondition::Term { terms: left_terms }, FilterCondition::Term { terms: right_terms }) => {
            same_terms(left_terms, right_terms)
        }
        (
            FilterCondition::Range { min: left_min, max: left_max },
            FilterCondition::Range { min: right_min, max: right_max },
        ) => left_min == right_min && left_max == right_max,
        _ => false,
    }
}

fn same_terms(left: &[String], right: &[String]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut left = left.iter().collect::<Vec<_>>();
    let mut right = right.iter().collect::<Vec<_>>();
    left.sort();
    right.sort();
    left == right
}

/// Keeps `existing` as is, then appends every addition that is not already present.
pub fn merge_filters_without_duplicates(existing: &[FilterClause], additions: &[FilterClause]) -> Vec<FilterClause> {
    let mut merged = existing.to_vec();
    for candidate in additions {
        if !merged.iter().any(|entry| are_filters_equivalent(entry, candidate)) {
            merged.push(candidate.clone());
        }
    }
    merged
}


/// One clause per field and operator: ranges are intersected, term lists are unioned.
///
/// Ranges come first, then terms, each in first-seen field order. Clauses without a
/// field are dropped.
pub fn collapse_filters(clauses: &[FilterClause]) -> Vec<FilterClause> {
    let mut ranges: Vec<(String, Option<f64>, Option<f64>)> = Vec::new();
    let mut terms: Vec<(String, Vec<String>)> = Vec::new();

    for clause in clauses.iter().filter(|clause| !clause.field.is_empty()) {
        match &clause.condition {
            FilterCondition::Range { min, max } => {
                match ranges.iter_mut().find(|(field, _, _)| *field == clause.field) {
                    Some((_, current_min, current_max)) => {
                        *current_min = tighter_bound(*current_min, *min, f64::max);
                        *current_max = tighter_bound(*current_max, *max, f64::min);
                    }
                    None => ranges.push((clause.field.clone(), *min, *max)),
                }
            }
            FilterCondition::Term { terms: values } => {
                match terms.iter_mut().find(|(field, _)| *field == clause.field) {
                    Some((_, current)) => {
                        for value in values {
                            if !current.contains(value) {
                                current.push(value.clone());
                            }
                        }
                    }
                    None => {
                        let mut unique = Vec::with_capacity(values.len());
                        for value in values {
                            if !unique.contains(value) {
                                unique.push(value.clone());
                            }
                        }
                        terms.push((clause.field.clone(), unique));
                    }
                }
            }
        }
    }

    ranges
        .into_iter()
        .map(|(field, min, max)| FilterClause::range(field, min, max))
        .chain(terms.into_iter().map(|(field, values)| FilterClause::term(field, values)))
        .collect()
}

fn tighter_bound(current: Option<f64>, candidate: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => Some(pick(current, candidate)),
        (current, candidate) => current.or(candidate),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_order_does_not_matter() {
        let left = FilterClause::term("brand", ["a", "b"]);
        let right = FilterClause::term("brand", ["b", "a"]);
        assert!(are_filters_equivalent(&left, &right));
    }

    #[test]
    fn term_multiplicity_matters() {
        let left = FilterClause::term("brand", ["a", "a"]);
        let right = FilterClause::term("brand", ["a"]);
        assert!(!are_filters_equivalent(&left, &right));
    }

    #[test]
    fn operator_and_field_must_match() {
        let term = FilterClause::term("price", Vec::<String>::new());
        let range = FilterClause::range("price", None, None);
        assert!(!are_filters_equivalent(&term, &range));
        assert!(!are_filters_equivalent(
            &FilterClause::range("price", Some(1.0), None),
            &FilterClause::range("weight", Some(1.0), None),
        ));
    }

    #[test]
    fn missing_bound_differs_from_zero() {
        let open = FilterClause::range("price", None, Some(10.0));
        let zero = FilterClause::range("price", Some(0.0), Some(10.0));
        assert!(!are_filters_equivalent(&open, &zero));
    }

    #[test]
    fn collapse_intersects_ranges_and_unions_terms() {
        let collapsed = collapse_filters(&[
            FilterClause::term("brand", ["LG"]),
            FilterClause::range("price", None, Some(500.0)),
            FilterClause::range("price", Some(0.0), None),
            FilterClause::range("price", Some(10.0), Some(800.0)),
            FilterClause::term("brand", ["Sony", "LG"]),
            FilterClause::term("", ["ignored"]),
        ]);
        assert_eq!(
            collapsed,
            vec![
                FilterClause::range("price", Some(10.0), Some(500.0)),
                FilterClause::term("brand", ["LG", "Sony"]),
            ]
        );
    }
}
