//! In-memory address cache.
//!
//! A [`Resolve`] implementation that answers from previously stored
//! records. Populating it is up to the application; the ordered strategy
//! only ever reads from it.

use super::resolve::{AddressFamily, AddressMode, AddressRecord, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Longest TTL a record may carry (RFC 2181 section 8). Longer TTLs are
/// clamped to it.
const MAX_TTL: Duration = Duration::from_secs(i32::MAX as u64);

/// A resolver that can also store results.
pub trait Cache: Resolve {
    /// Stores `record` for `name`, replacing any previous record of the same
    /// family.
    fn store(&self, name: Name, record: AddressRecord, ttl: Duration);
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    address: IpAddr,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe cache of resolved addresses, keyed by name and family.
///
/// Entries expire after their TTL. When full, expired entries are purged
/// first, then the entry closest to expiry is evicted.
///
/// The capacity bound is soft: the room check and the insert are separate
/// steps, so concurrent `store` calls into a full cache can each add one
/// entry past `max_entries`. The next store that finds the cache full
/// brings it back down. Eviction scans the whole map, so a full cache makes
/// every store of a new key O(n).
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<(Name, AddressFamily), CacheEntry>,
    max_entries: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    /// Create a cache holding up to 256 entries.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a cache holding up to `max_entries` entries.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now));
        before.saturating_sub(self.entries.len())
    }

    /// Look up a fresh address for `name` in one family.
    fn get(&self, name: &Name, family: AddressFamily, now: Instant) -> Option<IpAddr> {
        let key = (name.clone(), family);
        let entry = *self.entries.get(&key)?;
        if entry.is_fresh(now) {
            Some(entry.address)
        } else {
            self.entries.remove_if(&key, |_, e| !e.is_fresh(now));
            None
        }
    }

    fn make_room(&self) {
        if self.entries.len() < self.max_entries {
            return;
        }
        self.purge_expired();

        // Racing stores can leave the map above the bound.
        while self.entries.len() >= self.max_entries {
            let victim = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().expires_at)
                .map(|entry| entry.key().clone());
            match victim {
                Some(key) => {
                    tracing::trace!(domain = %key.0, "evicting cache entry");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Resolve for MemoryCache {
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving {
        let name = name.to_normalized();
        let now = Instant::now();
        let hit = mode
            .families()
            .iter()
            .find_map(|family| self.get(&name, *family, now));

        let result = match hit {
            Some(address) => {
                tracing::debug!(domain = %name, address = %address, "cache hit");
                Ok(AddressRecord::new(address))
            }
            None => Err(NetError::NameNotResolved),
        };
        Box::pin(std::future::ready(result))
    }
}

impl Cache for MemoryCache {
    fn store(&self, name: Name, record: AddressRecord, ttl: Duration) {
        if ttl.is_zero() || self.max_entries == 0 {
            return;
        }
        let name = name.to_normalized();
        let key = (name, record.family());
        if !self.entries.contains_key(&key) {
            self.make_room();
        }
        let Some(expires_at) = Instant::now().checked_add(ttl.min(MAX_TTL)) else {
            tracing::debug!(domain = %key.0, "TTL overflows the clock, not caching");
            return;
        };
        self.entries.insert(
            key,
            CacheEntry {
                address: record.address(),
                expires_at,
            },
        );
    }
}
