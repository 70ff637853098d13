//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use deltabots_core::types::PageRequest;

/// `?skip=&limit=` query parameters for list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Rows to skip (default 0).
    pub skip: Option<u64>,
    /// Rows to return (default and max 100).
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.skip.unwrap_or(defaults.skip),
            self.limit.unwrap_or(defaults.limit),
        )
    }
}
