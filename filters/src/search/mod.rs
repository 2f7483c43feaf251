//! Product search payload and HTTP client.

mod search_request;
pub use search_request::{ProductSearchRequest, DEFAULT_PAGE_SIZE};

mod search_client;
pub use search_client::ProductSearchClient;
