//! Offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Default and maximum number of rows returned by a list call.
const MAX_LIMIT: u64 = 100;

/// `skip`/`limit` window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the limit to `1..=100`.
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Returns a copy with the limit clamped.
    pub fn normalized(self) -> Self {
        Self::new(self.skip, self.limit)
    }

    /// SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        self.skip.min(i64::MAX as u64) as i64
    }

    /// SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_LIMIT) as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_LIMIT,
        }
    }
}

fn default_limit() -> u64 {
    MAX_LIMIT
}
