//! Fetch a remote JSON config with on-disk caching.
//!
//! Run it twice within two minutes and the second call is served from the
//! cache without a network request:
//!
//! ```sh
//! cargo run --example fetch_config -- https://example.com/config.json
//! ```

use std::sync::Arc;

use confetch::{ConfigCache, HttpSource, JsonFileStore, SourceConfig, SystemClock};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url_arg) = args.next() else {
        eprintln!("usage: fetch_config <url> [store-path]");
        std::process::exit(2);
    };
    let url = Url::parse(&url_arg)?;
    let store_path = args.next().unwrap_or_else(|| "confetch-store.json".to_string());

    let source = HttpSource::with_config(url, SourceConfig::default())?;
    let cache = ConfigCache::new(
        Arc::new(JsonFileStore::new(store_path)),
        Arc::new(source),
        Arc::new(SystemClock),
    );

    match cache.get().await {
        Some(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
        None => {
            eprintln!("no configuration available (network and cache both empty)");
            std::process::exit(1);
        }
    }

    Ok(())
}
