use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use snip_core::error::StorageError;
use snip_core::registry::{ReadRegistry, Registry, Result};
use snip_core::{Clock, ShortCode, SystemClock, UrlRecord};
use tracing::trace;

/// In-memory storage entry for a short link.
#[derive(Debug, Clone)]
struct Entry {
    original_url: String,
    created_at: Timestamp,
    clicks: u64,
}

impl Entry {
    fn to_record(&self, code: &ShortCode) -> UrlRecord {
        UrlRecord {
            code: code.clone(),
            original_url: self.original_url.clone(),
            created_at: self.created_at,
            clicks: self.clicks,
        }
    }
}

/// In-memory implementation of the Registry trait using DashMap.
///
/// DashMap shards its locks, so operations on codes in different shards
/// never block each other. Inserts go through the entry API and increments
/// hold the shard write guard for the whole read-modify-write, which makes
/// both atomic with respect to concurrent callers.
#[derive(Debug)]
pub struct InMemoryRegistry<C = SystemClock> {
    storage: DashMap<ShortCode, Entry>,
    clock: C,
}

impl InMemoryRegistry<SystemClock> {
    /// Creates a new in-memory registry.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> InMemoryRegistry<C> {
    /// Creates a registry that stamps `created_at` from the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            storage: DashMap::new(),
            clock,
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<C: Clock> ReadRegistry for InMemoryRegistry<C> {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.storage.get(code).map(|entry| entry.to_record(code)))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code))
    }
}

#[async_trait]
impl<C: Clock> Registry for InMemoryRegistry<C> {
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<UrlRecord> {
        match self.storage.entry(code.clone()) {
            MapEntry::Occupied(_) => Err(StorageError::DuplicateCode(code.to_string())),
            MapEntry::Vacant(vacant) => {
                let entry = Entry {
                    original_url,
                    created_at: self.clock.now(),
                    clicks: 0,
                };
                let record = entry.to_record(code);
                vacant.insert(entry);
                trace!(code = %code, "inserted record");
                Ok(record)
            }
        }
    }

    async fn lookup_and_increment(&self, code: &ShortCode) -> Result<Option<String>> {
        let Some(mut entry) = self.storage.get_mut(code) else {
            return Ok(None);
        };

        entry.clicks = entry.clicks.saturating_add(1);
        trace!(code = %code, clicks = entry.clicks, "counted click");
        Ok(Some(entry.original_url.clone()))
    }
}
