//! Live test against the real price feed.
//!
//! `#[ignore]` because it needs network access. Set `PRIJSWIJS_FEED_URL`
//! (directly or in a `.env` file) to point it at another endpoint.
//!
//! Run with:
//! ```bash
//! cargo test --test live_feed -- --ignored
//! ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use prijswijs::prelude::*;

fn feed_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("PRIJSWIJS_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string())
}

#[tokio::test]
#[ignore]
async fn test_fetch_window_from_live_feed() {
    let client = PriceFeedClient::new(&feed_url()).expect("client should build");
    let window = FetchWindow::around(Utc::now(), Duration::hours(1), Duration::hours(24));
    let series = client.fetch(&window).await.expect("feed should answer");

    assert!(!series.is_empty(), "feed returned no prices");
    let first = series.first().unwrap();
    assert!(first.timestamp >= window.start - Duration::hours(1));
}

#[tokio::test]
#[ignore]
async fn test_live_cycle_produces_payload() {
    let engine = AlertEngine::builder()
        .feed_url(&feed_url())
        .store(Arc::new(MemoryStore::new()))
        .build()
        .expect("engine should build");

    let payload = engine
        .produce_notification_payload()
        .await
        .expect("prices should be available");

    println!("{}\n{}", payload.title, payload.text);
    assert!(payload.text.starts_with("💡"));
    assert!(!payload.stale);
}
