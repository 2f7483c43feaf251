//! Thin HTTP client for the product search endpoint.

use anyhow::Context;

use crate::config::products_api_url;
use crate::search::ProductSearchRequest;


#[derive(Debug, Clone)]
pub struct ProductSearchClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProductSearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(products_api_url())
    }

    pub fn search_url(&self) -> String {
        format!("{}/api/products/search", self.base_url.trim_end_matches('/'))
    }

    /// Posts the request and returns the raw response document.
    pub async fn post_search(&self, request: &ProductSearchRequest) -> anyhow::Result<serde_json::Value> {
        let body = serde_json::to_string(request)?;
        tracing::info!(
            "Searching products: vertical={} page={} filters={}",
            request.vertical_id,
            request.page_number,
            request.filters.as_ref().map(|filters| filters.filters.len() + filters.filter_groups.len()).unwrap_or(0),
        );

        let t0 = std::time::Instant::now();
        let response = self
            .client
            .post(self.search_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }
        tracing::debug!("Search response: len = {} in {}ms", response_txt.len(), t0.elapsed().as_millis());

        let response = serde_json::from_str(&response_txt).context("Failed to parse product search response")?;
        Ok(response)
    }
}
