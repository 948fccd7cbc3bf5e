//! The remote calls the dashboard depends on.

use async_trait::async_trait;

use crate::{
    client::TwitterClient,
    error::Result,
    models::{MessageEvent, Tweet, User, UserId},
};

/// Remote operations the dashboard core needs from the platform.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Profile of the authenticated account.
    async fn verify_credentials(&self) -> Result<User>;

    /// Users the account follows, at most `count`.
    async fn friends(&self, count: u32) -> Result<Vec<User>>;

    /// The account's own statuses, most recent first, at most `count`.
    async fn user_timeline(&self, count: u32) -> Result<Vec<Tweet>>;

    /// Direct-message events, most recent first, at most `count`.
    async fn message_events(&self, count: u32) -> Result<Vec<MessageEvent>>;

    /// Profiles for the given user IDs.
    async fn lookup_users(&self, ids: &[UserId]) -> Result<Vec<User>>;

    /// Post a status and return it as created.
    async fn update_status(&self, status: &str) -> Result<Tweet>;
}

#[async_trait]
impl SocialApi for TwitterClient {
    async fn verify_credentials(&self) -> Result<User> {
        self.account().verify_credentials().await
    }

    async fn friends(&self, count: u32) -> Result<Vec<User>> {
        Ok(self.users().friends().count(count).send().await?.users)
    }

    async fn user_timeline(&self, count: u32) -> Result<Vec<Tweet>> {
        self.statuses().user_timeline().count(count).send().await
    }

    async fn message_events(&self, count: u32) -> Result<Vec<MessageEvent>> {
        Ok(self.messages().events().count(count).send().await?.events)
    }

    async fn lookup_users(&self, ids: &[UserId]) -> Result<Vec<User>> {
        self.users().lookup(ids).await
    }

    async fn update_status(&self, status: &str) -> Result<Tweet> {
        self.statuses().update(status).send().await
    }
}
