//! Status API.

use std::sync::Arc;

use crate::{
    client::TwitterClientInner,
    error::{Error, Result},
    models::Tweet,
};

/// API for status updates.
pub struct StatusApi {
    client: Arc<TwitterClientInner>,
}

impl StatusApi {
    pub(crate) fn new(client: Arc<TwitterClientInner>) -> Self {
        Self { client }
    }

    /// The account's own recent statuses, most recent first.
    pub fn user_timeline(&self) -> TimelineBuilder {
        TimelineBuilder {
            client: self.client.clone(),
            count: 20,
        }
    }

    /// Post a new status.
    pub fn update(&self, status: impl Into<String>) -> UpdateBuilder {
        UpdateBuilder {
            client: self.client.clone(),
            status: status.into(),
        }
    }
}

/// Builder for user timeline requests.
pub struct TimelineBuilder {
    client: Arc<TwitterClientInner>,
    count: u32,
}

impl TimelineBuilder {
    /// Set how many statuses to return.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Execute the request.
    pub async fn send(self) -> Result<Vec<Tweet>> {
        let count = self.count.to_string();
        self.client
            .get("statuses/user_timeline.json", &[("count", count.as_str())])
            .await
    }
}

/// Builder for posting a status.
pub struct UpdateBuilder {
    client: Arc<TwitterClientInner>,
    status: String,
}

impl UpdateBuilder {
    /// Execute the request, returning the created status.
    pub async fn send(self) -> Result<Tweet> {
        validate_status(&self.status)?;

        self.client
            .post("statuses/update.json", &[("status", self.status.as_str())])
            .await
    }
}

/// Reject status text that is empty or only whitespace.
pub fn validate_status(status: &str) -> Result<()> {
    if status.trim().is_empty() {
        return Err(Error::InvalidArgument("Status text cannot be empty".into()));
    }
    Ok(())
}
