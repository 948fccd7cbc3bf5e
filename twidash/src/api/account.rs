//! Account API.

use std::sync::Arc;

use crate::{
    client::TwitterClientInner,
    error::{Error, Result},
    models::User,
};

/// API for the authenticated account.
pub struct AccountApi {
    client: Arc<TwitterClientInner>,
}

impl AccountApi {
    pub(crate) fn new(client: Arc<TwitterClientInner>) -> Self {
        Self { client }
    }

    /// Get the profile of the account the credentials belong to.
    ///
    /// The embedded latest status and entities are left out.
    pub async fn verify_credentials(&self) -> Result<User> {
        let user: User = self
            .client
            .get(
                "account/verify_credentials.json",
                &[("skip_status", "true"), ("include_entities", "false")],
            )
            .await?;

        if user.id.as_str().is_empty() {
            return Err(Error::missing("id_str"));
        }
        Ok(user)
    }
}
