//! Filter clauses and requests sent to the product search API.

use serde::{Deserialize, Serialize};


/// One condition on an indexed product field.
///
/// Serializes as `{"field": .., "operator": "term", "terms": [..]}` or
/// `{"field": .., "operator": "range", "min": .., "max": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    #[serde(flatten)]
    pub condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "lowercase")]
pub enum FilterCondition {
    Term {
        #[serde(default)]
        terms: Vec<String>,
    },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
}

impl FilterClause {
    pub fn term<I, S>(field: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            condition: FilterCondition::Term {
                terms: terms.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            field: field.into(),
            condition: FilterCondition::Range { min, max },
        }
    }
}


/// Boolean grouping of clauses: every `must` clause and at least one `should` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterGroup {
    pub must: Vec<FilterClause>,
    pub should: Vec<FilterClause>,
}

impl FilterGroup {
    pub fn should(clauses: Vec<FilterClause>) -> Self {
        Self { must: Vec::new(), should: clauses }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterClause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_groups: Vec<FilterGroup>,
}

impl FilterRequest {
    pub fn from_filters(filters: Vec<FilterClause>) -> Self {
        Self { filters, filter_groups: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.filter_groups.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_json_puts_field_before_operator() {
        let clause = FilterClause::term("brand", ["Nudger"]);
        let json = serde_json::to_string(&clause).unwrap();
        assert_eq!(json, r#"{"field":"brand","operator":"term","terms":["Nudger"]}"#);
    }

    #[test]
    fn range_clause_omits_missing_bounds() {
        let clause = FilterClause::range("price.min", None, Some(500.0));
        let value = serde_json::to_value(&clause).unwrap();
        assert_eq!(value, serde_json::json!({"field": "price.min", "operator": "range", "max": 500.0}));
    }

    #[test]
    fn integer_bounds_parse_as_floats() {
        let clause: FilterClause =
            serde_json::from_str(r#"{"field":"screenSize","operator":"range","min":50,"max":60}"#).unwrap();
        assert_eq!(clause, FilterClause::range("screenSize", Some(50.0), Some(60.0)));
    }

    #[test]
    fn empty_request_serializes_to_empty_object() {
        let json = serde_json::to_string(&FilterRequest::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn group_sides_default_to_empty() {
        let group: FilterGroup =
            serde_json::from_str(r#"{"should":[{"field":"recycled","operator":"term","terms":["yes"]}]}"#).unwrap();
        assert!(group.must.is_empty());
        assert_eq!(group.should.len(), 1);
    }
}
