use crate::validate::validate_url;
use async_trait::async_trait;
use snip_core::{Registry, ShortCode, Shortener, ShortenerError, StorageError, UrlRecord};
use snip_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use typed_builder::TypedBuilder;

/// Tuning for the short code allocation loop.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AllocationSettings {
    /// How many candidate codes to try before giving up.
    #[builder(default = AllocationSettings::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// Codes that must never be handed out, e.g. because they shadow a route.
    #[builder(default)]
    pub reserved: Vec<ShortCode>,
}

impl AllocationSettings {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Registry` and a `Generator`. Generated codes are
/// only candidates: each one is checked against the registry, and a
/// collision (including losing an insert race) triggers another attempt,
/// up to `AllocationSettings::max_attempts`.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    registry: Arc<R>,
    generator: Arc<G>,
    settings: AllocationSettings,
}

impl<R: Registry, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default allocation settings.
    pub fn new(registry: R, generator: G) -> Self {
        Self::with_settings(registry, generator, AllocationSettings::default())
    }

    /// Creates a service with explicit allocation settings.
    ///
    /// `max_attempts` is raised to at least one so every request tries a code.
    pub fn with_settings(registry: R, generator: G, mut settings: AllocationSettings) -> Self {
        if settings.max_attempts == 0 {
            warn!("max_attempts of 0 would reject every request, using 1");
            settings.max_attempts = 1;
        }

        Self {
            registry: Arc::new(registry),
            generator: Arc::new(generator),
            settings,
        }
    }

    pub fn settings(&self) -> &AllocationSettings {
        &self.settings
    }

    async fn allocate(&self, original_url: &str) -> Result<UrlRecord, ShortenerError> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let code: ShortCode = self.generator.generate().into();

            if self.settings.reserved.contains(&code) || self.registry.exists(&code).await? {
                debug!(code = %code, attempt, "short code collision");
                continue;
            }

            match self.registry.insert(&code, original_url.to_owned()).await {
                Ok(record) => return Ok(record),
                Err(StorageError::DuplicateCode(_)) => {
                    debug!(code = %code, attempt, "lost insert race for short code");
                }
                Err(other) => return Err(other.into()),
            }
        }

        error!(attempts = max_attempts, "short code allocation exhausted");
        Err(ShortenerError::AllocationExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<R: Registry, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: &str) -> Result<UrlRecord, ShortenerError> {
        validate_url(original_url)?;

        let record = self.allocate(original_url).await?;
        info!(code = %record.code, url = %record.original_url, "created short link");
        Ok(record)
    }

    async fn redirect(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        trace!(code = %code, "resolving short code");

        match self.registry.lookup_and_increment(code).await? {
            Some(url) => Ok(url),
            None => {
                trace!(code = %code, "short code not found");
                Err(ShortenerError::NotFound(code.to_string()))
            }
        }
    }

    async fn stats(&self, code: &ShortCode) -> Result<UrlRecord, ShortenerError> {
        self.registry
            .get(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_core::ReadRegistry;
    use snip_generator::RandomGenerator;
    use snip_storage::InMemoryRegistry;
    use std::sync::atomic::{AtomicU32, Ordering};

    type StorageResult<T> = std::result::Result<T, StorageError>;

    /// Reports every code as free, then loses the insert for the first
    /// `losses` calls, as if another request claimed the code in between.
    #[derive(Debug, Default)]
    struct RacingRegistry {
        inner: InMemoryRegistry,
        losses: u32,
        inserts: AtomicU32,
    }

    impl RacingRegistry {
        fn losing(losses: u32) -> Self {
            Self {
                losses,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ReadRegistry for RacingRegistry {
        async fn get(&self, code: &ShortCode) -> StorageResult<Option<UrlRecord>> {
            self.inner.get(code).await
        }

        async fn exists(&self, _code: &ShortCode) -> StorageResult<bool> {
            Ok(false)
        }
    }

    #[async_trait]
    impl Registry for RacingRegistry {
        async fn insert(&self, code: &ShortCode, original_url: String) -> StorageResult<UrlRecord> {
            if self.inserts.fetch_add(1, Ordering::SeqCst) < self.losses {
                return Err(StorageError::DuplicateCode(code.to_string()));
            }
            self.inner.insert(code, original_url).await
        }

        async fn lookup_and_increment(&self, code: &ShortCode) -> StorageResult<Option<String>> {
            self.inner.lookup_and_increment(code).await
        }
    }

    fn test_service() -> ShortenerService<InMemoryRegistry, RandomGenerator> {
        ShortenerService::new(InMemoryRegistry::new(), RandomGenerator::seeded(42))
    }

    /// Always yields the same code, counting how often it was asked.
    #[derive(Debug, Default)]
    struct StuckGenerator {
        calls: AtomicU32,
    }

    impl Generator for StuckGenerator {
        type Output = ShortCode;

        fn generate(&self) -> ShortCode {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ShortCode::new_unchecked("AAAAAA")
        }
    }

    /// Replays a fixed list of codes in order.
    #[derive(Debug)]
    struct ScriptedGenerator {
        codes: Vec<&'static str>,
        next: AtomicU32,
    }

    impl ScriptedGenerator {
        fn new(codes: Vec<&'static str>) -> Self {
            Self {
                codes,
                next: AtomicU32::new(0),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        type Output = ShortCode;

        fn generate(&self) -> ShortCode {
            let i = self.next.fetch_add(1, Ordering::SeqCst) as usize;
            ShortCode::new_unchecked(self.codes[i % self.codes.len()])
        }
    }

    #[tokio::test]
    async fn shorten_then_redirect_and_stats() {
        let service = test_service();

        let record = service
            .shorten("https://example.com/a/b?c=1")
            .await
            .unwrap();
        assert_eq!(record.code.as_str().len(), 6);
        assert_eq!(record.clicks, 0);

        let url = service.redirect(&record.code).await.unwrap();
        assert_eq!(url, "https://example.com/a/b?c=1");

        let stats = service.stats(&record.code).await.unwrap();
        assert_eq!(stats.clicks, 1);
        assert_eq!(stats.created_at, record.created_at);
    }

    #[tokio::test]
    async fn shorten_with_invalid_url_fails() {
        let service = test_service();

        let err = service.shorten("not-a-valid-url").await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let service = test_service();
        let code = ShortCode::new("ZZZZZZ").unwrap();

        assert_eq!(
            service.redirect(&code).await.unwrap_err(),
            ShortenerError::NotFound("ZZZZZZ".to_string())
        );
        assert_eq!(
            service.stats(&code).await.unwrap_err(),
            ShortenerError::NotFound("ZZZZZZ".to_string())
        );
    }

    #[tokio::test]
    async fn collisions_are_retried() {
        let registry = InMemoryRegistry::new();
        registry
            .insert(&ShortCode::new_unchecked("taken1"), "https://a.com".into())
            .await
            .unwrap();
        registry
            .insert(&ShortCode::new_unchecked("taken2"), "https://b.com".into())
            .await
            .unwrap();

        let generator = ScriptedGenerator::new(vec!["taken1", "taken2", "fresh1"]);
        let service = ShortenerService::new(registry, generator);

        let record = service.shorten("https://c.com").await.unwrap();
        assert_eq!(record.code.as_str(), "fresh1");
        assert_eq!(record.original_url, "https://c.com");
    }

    #[tokio::test]
    async fn allocation_gives_up_after_max_attempts() {
        let registry = InMemoryRegistry::new();
        registry
            .insert(&ShortCode::new_unchecked("AAAAAA"), "https://a.com".into())
            .await
            .unwrap();

        let settings = AllocationSettings::builder().max_attempts(5).build();
        let service =
            ShortenerService::with_settings(registry, StuckGenerator::default(), settings);

        let err = service.shorten("https://b.com").await.unwrap_err();
        assert_eq!(err, ShortenerError::AllocationExhausted { attempts: 5 });
        assert_eq!(service.generator.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn lost_insert_races_are_retried() {
        let generator = ScriptedGenerator::new(vec!["race01", "race02", "fresh1"]);
        let service = ShortenerService::new(RacingRegistry::losing(2), generator);

        let record = service.shorten("https://c.com").await.unwrap();
        assert_eq!(record.code.as_str(), "fresh1");
        assert_eq!(service.registry.inserts.load(Ordering::SeqCst), 3);

        let url = service.redirect(&record.code).await.unwrap();
        assert_eq!(url, "https://c.com");
    }

    #[tokio::test]
    async fn losing_every_insert_race_exhausts_allocation() {
        let settings = AllocationSettings::builder().max_attempts(4).build();
        let generator = ScriptedGenerator::new(vec!["race01", "race02"]);
        let service =
            ShortenerService::with_settings(RacingRegistry::losing(u32::MAX), generator, settings);

        let err = service.shorten("https://c.com").await.unwrap_err();
        assert_eq!(err, ShortenerError::AllocationExhausted { attempts: 4 });
        assert_eq!(service.registry.inserts.load(Ordering::SeqCst), 4);
        assert!(service.registry.inner.is_empty());
    }

    #[tokio::test]
    async fn zero_max_attempts_still_tries_once() {
        let settings = AllocationSettings::builder().max_attempts(0).build();
        let service =
            ShortenerService::with_settings(InMemoryRegistry::new(), StuckGenerator::default(), settings);
        assert_eq!(service.settings().max_attempts, 1);

        let record = service.shorten("https://a.com").await.unwrap();
        assert_eq!(record.code.as_str(), "AAAAAA");

        let err = service.shorten("https://b.com").await.unwrap_err();
        assert_eq!(err, ShortenerError::AllocationExhausted { attempts: 1 });
        assert_eq!(service.generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn reserved_codes_are_skipped() {
        let settings = AllocationSettings::builder()
            .reserved(vec![ShortCode::new_unchecked("health")])
            .build();
        let generator = ScriptedGenerator::new(vec!["health", "fresh1"]);
        let service = ShortenerService::with_settings(InMemoryRegistry::new(), generator, settings);

        let record = service.shorten("https://c.com").await.unwrap();
        assert_eq!(record.code.as_str(), "fresh1");
    }

    #[tokio::test]
    async fn default_settings() {
        let service = test_service();
        assert_eq!(
            service.settings().max_attempts,
            AllocationSettings::DEFAULT_MAX_ATTEMPTS
        );
        assert!(service.settings().reserved.is_empty());
    }
}
