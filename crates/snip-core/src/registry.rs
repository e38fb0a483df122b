use crate::error::StorageError;
use crate::record::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a registry.
///
/// Reads never mutate the click counter.
#[async_trait]
pub trait ReadRegistry: Send + Sync + 'static {
    /// Retrieves a snapshot of the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Checks whether a short code already exists in the registry.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

/// The single source of truth for short code to record mappings.
///
/// Every mutation is atomic with respect to concurrent callers.
#[async_trait]
pub trait Registry: ReadRegistry {
    /// Creates a new record with zero clicks and the current time.
    ///
    /// Returns `Err(DuplicateCode)` if the code already exists. When two
    /// callers race on the same code exactly one of them succeeds.
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<UrlRecord>;

    /// Increments the click counter by one and returns the original URL.
    /// Returns `None` if the code does not exist.
    async fn lookup_and_increment(&self, code: &ShortCode) -> Result<Option<String>>;
}
