//! # Confetch
//!
//! Remote JSON configuration fetching with a persistent cache and stale
//! fallback.
//!
//! The crate composes three injected collaborators — a persistent key-value
//! [`ConfigStore`], a network [`ConfigSource`], and a [`Clock`] — into a
//! [`ConfigCache`] whose [`get`](ConfigCache::get) prefers fresh cached data,
//! refreshes it once the freshness window has elapsed, and serves stale data
//! when the refresh fails. Availability wins over freshness: a stale config is
//! always preferred over no config.
//!
//! ## Features
//!
//! - Freshness-window caching over any [`ConfigStore`] backend
//! - In-memory and single-file JSON store backends
//! - HTTP source via `reqwest` with configurable timeout and headers
//! - Deterministic tests through injected store, source, and clock

mod cache;
mod clock;
mod error;
mod source;
mod store;

pub use cache::{
    CachedConfig, ConfigCache, DEFAULT_FRESHNESS_WINDOW, KEY_FETCHED_AT, KEY_PAYLOAD,
};
pub use clock::{Clock, SystemClock};
pub use error::FetchError;
pub use source::{ConfigSource, DEFAULT_USER_AGENT, HttpSource, SourceConfig};
pub use store::{ConfigStore, JsonFileStore, MemoryStore};
