//! Category page state carried in the URL fragment.

use serde::{Deserialize, Deserializer, Serialize};

use crate::filter_request::FilterRequest;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryView {
    Cards,
    List,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SortRequest {
    pub sorts: Vec<SortOption>,
}


/// Everything a category page needs to restore itself from `#<token>`.
///
/// `page_number` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryHashState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortRequest>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_page_number")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<CategoryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_subsets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_expanded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_expanded: Option<bool>,
}

/// Page numbers below 1, fractional or out of range read as absent instead of failing the state.
fn deserialize_page_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let page = Option::<f64>::deserialize(deserializer)?;
    Ok(page
        .filter(|page| page.fract() == 0.0 && *page >= 1.0 && *page <= u32::MAX as f64)
        .map(|page| page as u32))
}
