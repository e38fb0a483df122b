use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use snip_core::UrlRecord;

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: Timestamp,
}

impl From<UrlRecord> for StatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.code.to_string(),
            original_url: record.original_url,
            clicks: record.clicks,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
