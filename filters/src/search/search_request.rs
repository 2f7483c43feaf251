//! Body of `POST /api/products/search`.

use common::category_subset::VerticalSubsetDto;
use common::filter_request::FilterRequest;
use common::hash_state::{CategoryHashState, SortRequest};
use serde::{Deserialize, Serialize};

use crate::subsets::build_filter_request_from_subsets;

pub const DEFAULT_PAGE_SIZE: u32 = 24;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchRequest {
    pub vertical_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortRequest>,
    /// 0-based, unlike the page number kept in the URL.
    pub page_number: u32,
    pub page_size: u32,
}

impl ProductSearchRequest {
    /// Manual filters from the state plus one `should` group per active subset group.
    pub fn from_hash_state(
        vertical_id: impl Into<String>,
        state: &CategoryHashState,
        subsets: &[VerticalSubsetDto],
        page_size: u32,
    ) -> Self {
        let mut filters = state.filters.clone().unwrap_or_default();
        let subset_request = build_filter_request_from_subsets(subsets, &state.active_subsets);
        filters.filter_groups.extend(subset_request.filter_groups);

        let query = state
            .search
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_string);

        Self {
            vertical_id: vertical_id.into(),
            query,
            filters: if filters.is_empty() { None } else { Some(filters) },
            sort: state.sort.clone().filter(|sort| !sort.sorts.is_empty()),
            page_number: state.page_number.unwrap_or(1).saturating_sub(1),
            page_size,
        }
    }
}
