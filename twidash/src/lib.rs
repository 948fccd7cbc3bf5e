//! Personal social-media dashboard.
//!
//! Fetches the account profile, friends, recent statuses and direct
//! messages concurrently, merges them into one [`ViewModel`], and keeps the
//! latest view in a [`ViewCache`] so posting a status can update it in place.

pub mod api;
pub mod cache;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod models;

// Re-export main types
pub use cache::{RefreshTicket, ViewCache};
pub use client::{Credentials, HttpConfig, TwitterClient, TwitterClientBuilder};
pub use dashboard::{Dashboard, DashboardConfig, PostOutcome, SocialApi, ViewModel};
pub use error::{Error, Result};

// Re-export commonly used models
pub use models::{
    CreatedAt, EventId, MessageEvent, TimeFormatter, Tweet, TweetId, User, UserId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = TwitterClient::builder().build();
        assert!(client.is_ok());

        let client = client.unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_with_auth() {
        let client = TwitterClient::builder()
            .auth("ck", "cs", "42-token", "ts")
            .build()
            .unwrap();

        assert!(client.is_authenticated());
        assert_eq!(
            client.credentials().and_then(|c| c.token_user_id()),
            Some("42")
        );
    }

    #[test]
    fn test_client_rejects_partial_auth() {
        let result = TwitterClient::builder().auth("ck", "", "42-token", "ts").build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_unauthenticated_request() {
        let client = TwitterClient::builder().build().unwrap();
        let err = client.account().verify_credentials().await.unwrap_err();
        assert!(err.is_auth_error());
    }
}
