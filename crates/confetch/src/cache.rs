//! Config cache fetcher.
//!
//! Composes a persistent store, a network source, and a clock into a single
//! [`ConfigCache::get`] that serves a fresh cached payload without touching
//! the network, refreshes once the freshness window has elapsed, and falls
//! back to the stale entry when the refresh fails.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::FetchError;
use crate::source::ConfigSource;
use crate::store::ConfigStore;

/// Store key holding the cached payload.
pub const KEY_PAYLOAD: &str = "remote_config";

/// Store key holding the fetch timestamp (milliseconds since the Unix epoch).
pub const KEY_FETCHED_AT: &str = "remote_config_fetched_at";

/// How long a cached payload stays authoritative without a network check.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(2 * 60);

/// A cached configuration payload and the time it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedConfig {
    pub payload: Value,
    /// Milliseconds since the Unix epoch at which the payload was stored.
    pub fetched_at: i64,
}

impl CachedConfig {
    /// Age of the entry relative to `now`, in milliseconds.
    pub fn age_millis(&self, now: i64) -> i64 {
        now - self.fetched_at
    }

    /// Whether the entry still counts as authoritative.
    pub fn is_fresh(&self, now: i64, window: Duration) -> bool {
        self.age_millis(now) < window.as_millis() as i64
    }
}

/// Remote configuration fetcher with a persistent cache.
///
/// [`get`](Self::get) never fails: fetch and parse errors degrade to the
/// cached value, and only the total absence of both network and cache yields
/// `None`. A stale config is always preferred over no config.
pub struct ConfigCache {
    store: Arc<dyn ConfigStore>,
    source: Arc<dyn ConfigSource>,
    clock: Arc<dyn Clock>,
    freshness_window: Duration,
}

impl ConfigCache {
    /// Create a cache with the default 2-minute freshness window.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        source: Arc<dyn ConfigSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_freshness_window(store, source, clock, DEFAULT_FRESHNESS_WINDOW)
    }

    /// Create a cache with a custom freshness window.
    pub fn with_freshness_window(
        store: Arc<dyn ConfigStore>,
        source: Arc<dyn ConfigSource>,
        clock: Arc<dyn Clock>,
        freshness_window: Duration,
    ) -> Self {
        Self {
            store,
            source,
            clock,
            freshness_window,
        }
    }

    /// Return the best available configuration payload.
    ///
    /// A cached payload younger than the freshness window is returned without
    /// a network call. Otherwise the source is fetched once; on success the
    /// payload and timestamp are written back together and the payload is
    /// returned. On failure the stored entry is served as-is, stale or not.
    ///
    /// # Returns
    /// * `Some(payload)` - fresh, refreshed, or stale config
    /// * `None` - no cache exists and the fetch failed
    pub async fn get(&self) -> Option<Value> {
        let now = self.clock.now_millis();

        if let Some(entry) = self.read_cached().await {
            if entry.is_fresh(now, self.freshness_window) {
                debug!(age_ms = entry.age_millis(now), "Cache hit, serving fresh config");
                return Some(entry.payload);
            }
        }

        match self.fetch_and_persist().await {
            Ok(payload) => Some(payload),
            Err(error) => {
                warn!(error = %error, "Config refresh failed, falling back to cached value");
                let fallback = self.read_cached().await;
                match &fallback {
                    Some(entry) => {
                        debug!(age_ms = entry.age_millis(now), "Serving stale config")
                    }
                    None => debug!("No cached config available"),
                }
                fallback.map(|entry| entry.payload)
            }
        }
    }

    /// Fetch and persist unconditionally, ignoring the freshness window.
    ///
    /// Unlike [`get`](Self::get), errors propagate so a caller driving an
    /// explicit reload can distinguish failure from an empty result.
    pub async fn refresh(&self) -> Result<Value, FetchError> {
        self.fetch_and_persist().await
    }

    /// Read-only view of the stored entry. No network access, no writes.
    pub async fn cached(&self) -> Option<CachedConfig> {
        self.read_cached().await
    }

    async fn fetch_and_persist(&self) -> Result<Value, FetchError> {
        let payload = self.source.fetch().await?;

        let fetched_at = self.clock.now_millis();
        let entries = HashMap::from([
            (KEY_PAYLOAD.to_string(), payload.clone()),
            (KEY_FETCHED_AT.to_string(), Value::from(fetched_at)),
        ]);

        // The fresh payload is still the best available answer even if it
        // could not be persisted.
        if let Err(error) = self.store.set(entries).await {
            warn!(error = %error, "Failed to persist refreshed config (non-fatal)");
        } else {
            debug!(fetched_at, "Stored refreshed config");
        }

        Ok(payload)
    }

    /// Read the payload and timestamp entries from the store.
    ///
    /// A store read failure is treated like absent keys.
    async fn read_cached(&self) -> Option<CachedConfig> {
        let mut mapping = match self.store.get(&[KEY_PAYLOAD, KEY_FETCHED_AT]).await {
            Ok(mapping) => mapping,
            Err(error) => {
                warn!(error = %error, "Config store read failed, treating as empty cache");
                return None;
            }
        };

        let payload = mapping.remove(KEY_PAYLOAD)?;
        // A missing or non-numeric timestamp keeps the entry usable as a
        // stale fallback, but it never counts as fresh.
        let fetched_at = mapping
            .remove(KEY_FETCHED_AT)
            .and_then(|value| value.as_i64())
            .unwrap_or(0);

        Some(CachedConfig {
            payload,
            fetched_at,
        })
    }
}
