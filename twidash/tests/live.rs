//! Checks against the real platform. Needs credentials in the environment
//! or a `.env` file; run with `cargo test -- --ignored`.

use std::env;
use std::sync::Arc;

use twidash::{Dashboard, DashboardConfig, TwitterClient};

fn client_from_env() -> Option<TwitterClient> {
    dotenv::dotenv().ok();

    let var = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());
    let client = TwitterClient::builder()
        .auth(
            var("TWIDASH_CONSUMER_KEY")?,
            var("TWIDASH_CONSUMER_SECRET")?,
            var("TWIDASH_ACCESS_TOKEN")?,
            var("TWIDASH_ACCESS_TOKEN_SECRET")?,
        )
        .build()
        .ok()?;
    Some(client)
}

#[tokio::test]
#[ignore]
async fn live_refresh() {
    let Some(client) = client_from_env() else {
        eprintln!("No credentials, skipping");
        return;
    };

    let dash = Dashboard::new(Arc::new(client), DashboardConfig::default());
    let view = dash.refresh().await.expect("aggregation pass");

    assert!(!view.account.id.is_empty());
    assert!(view.friends.len() <= 5);
    assert!(view.tweets.iter().all(|t| t.created_at.is_display()));
    assert!(view.messages.iter().all(|m| m.created_timestamp.is_display()));
    if let Some(buddy) = &view.chat_buddy {
        assert_ne!(buddy.id, view.account.id);
    }
}
