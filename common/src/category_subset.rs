//! Predefined category subsets ("fast filters") as served by the category configuration.

use serde::{Deserialize, Serialize};

use crate::filter_request::FilterClause;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubsetOperator {
    Equals,
    LowerThan,
    GreaterThan,
    // LOWER_THAN_OR_EQUAL and friends exist server side but have no filter counterpart here
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SubsetCriteria {
    pub field: Option<String>,
    pub operator: Option<SubsetOperator>,
    pub value: Option<String>,
}

impl SubsetCriteria {
    pub fn new(field: impl Into<String>, operator: SubsetOperator, value: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            operator: Some(operator),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerticalSubsetDto {
    pub id: String,
    pub group: Option<String>,
    pub caption: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub criterias: Vec<SubsetCriteria>,
}


/// One removable "active filter" chip derived from a single subset criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySubsetClause {
    pub id: String,
    pub subset_id: String,
    pub index: usize,
    pub label: String,
    pub filter: FilterClause,
}
