use crate::record::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates the URL, allocates a fresh short code and stores the record.
    async fn shorten(&self, original_url: &str) -> Result<UrlRecord>;

    /// Resolves a short code for a redirect, counting one click.
    async fn redirect(&self, code: &ShortCode) -> Result<String>;

    /// Returns the stored record without counting a click.
    async fn stats(&self, code: &ShortCode) -> Result<UrlRecord>;
}
