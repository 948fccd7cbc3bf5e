//! User API.

use std::sync::Arc;

use crate::{
    client::TwitterClientInner,
    error::{Error, Result},
    models::{FriendsPage, User, UserId},
};

/// Upper bound the lookup endpoint accepts per request.
pub const MAX_LOOKUP_IDS: usize = 100;

/// API for user operations.
pub struct UserApi {
    client: Arc<TwitterClientInner>,
}

impl UserApi {
    pub(crate) fn new(client: Arc<TwitterClientInner>) -> Self {
        Self { client }
    }

    /// List users the account follows.
    pub fn friends(&self) -> FriendsBuilder {
        FriendsBuilder {
            client: self.client.clone(),
            count: 20,
        }
    }

    /// Look up profiles by ID.
    pub async fn lookup(&self, ids: &[UserId]) -> Result<Vec<User>> {
        if ids.is_empty() || ids.len() > MAX_LOOKUP_IDS {
            return Err(Error::InvalidArgument(format!(
                "Lookup takes 1 to {} user IDs, got {}",
                MAX_LOOKUP_IDS,
                ids.len()
            )));
        }

        let joined = ids
            .iter()
            .map(UserId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        self.client
            .get("users/lookup.json", &[("user_id", joined.as_str())])
            .await
    }
}

/// Builder for friends list requests.
pub struct FriendsBuilder {
    client: Arc<TwitterClientInner>,
    count: u32,
}

impl FriendsBuilder {
    /// Set how many users to return.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Execute the request.
    pub async fn send(self) -> Result<FriendsPage> {
        let count = self.count.to_string();
        self.client
            .get("friends/list.json", &[("count", count.as_str())])
            .await
    }
}
