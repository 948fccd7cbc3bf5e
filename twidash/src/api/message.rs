//! Direct message API.

use std::sync::Arc;

use crate::{client::TwitterClientInner, error::Result, models::EventsPage};

/// API for direct message events.
pub struct MessageApi {
    client: Arc<TwitterClientInner>,
}

impl MessageApi {
    pub(crate) fn new(client: Arc<TwitterClientInner>) -> Self {
        Self { client }
    }

    /// List recent message events, most recent first.
    pub fn events(&self) -> EventsBuilder {
        EventsBuilder {
            client: self.client.clone(),
            count: 20,
        }
    }
}

/// Builder for message event list requests.
pub struct EventsBuilder {
    client: Arc<TwitterClientInner>,
    count: u32,
}

impl EventsBuilder {
    /// Set how many events to return.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Execute the request.
    pub async fn send(self) -> Result<EventsPage> {
        let count = self.count.to_string();
        self.client
            .get("direct_messages/events/list.json", &[("count", count.as_str())])
            .await
    }
}
