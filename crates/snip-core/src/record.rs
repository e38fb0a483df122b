use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A snapshot of a stored short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The short code the record is stored under.
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// Number of successful redirects through this code.
    pub clicks: u64,
}

impl UrlRecord {
    /// Creates a fresh record with a zero click count.
    pub fn new(code: ShortCode, original_url: String, created_at: Timestamp) -> Self {
        Self {
            code,
            original_url,
            created_at,
            clicks: 0,
        }
    }
}
