//! In-memory `SocialApi` for tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::error::{Error, Result};
use crate::models::{CreatedAt, MessageCreate, MessageEvent, MessageTarget, Tweet, User, UserId};

use super::SocialApi;

pub fn user(id: &str, screen_name: &str) -> User {
    User {
        id: id.into(),
        name: screen_name.to_uppercase(),
        screen_name: screen_name.into(),
        ..Default::default()
    }
}

pub fn tweet(id: &str, created_at: &str) -> Tweet {
    Tweet {
        id: id.into(),
        text: format!("status {}", id),
        created_at: created_at.into(),
        ..Default::default()
    }
}

pub fn event_at(id: &str, sender: &str, millis: &str) -> MessageEvent {
    MessageEvent {
        id: id.into(),
        kind: "message_create".into(),
        created_timestamp: CreatedAt::Raw(millis.into()),
        message_create: MessageCreate {
            sender_id: sender.into(),
            target: MessageTarget {
                recipient_id: "42".into(),
            },
            ..Default::default()
        },
    }
}

pub fn event(id: &str, sender: &str) -> MessageEvent {
    event_at(id, sender, "1539203964000")
}

#[derive(Default)]
pub struct Calls {
    lookups: Vec<Vec<UserId>>,
    posted: Vec<String>,
}

/// Serves canned data and records the calls that matter to tests.
#[derive(Default)]
pub struct FakeApi {
    pub account: User,
    pub friends: Vec<User>,
    pub timeline: Vec<Tweet>,
    pub events: Vec<MessageEvent>,
    /// `created_at` given to posted statuses; a fixed platform date if unset.
    pub post_created_at: Option<&'static str>,
    pub profiles: Mutex<Vec<User>>,
    pub failing: HashSet<&'static str>,
    pub timeline_gate: Mutex<Option<Arc<Notify>>>,
    pub calls: Mutex<Calls>,
    pub next_id: Mutex<u64>,
}

impl FakeApi {
    /// Make one endpoint fail: `account`, `friends`, `timeline`, `events`,
    /// `lookup` or `update`.
    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    pub fn add_profile(&self, user: User) {
        self.profiles.lock().unwrap().push(user);
    }

    /// Hold the next timeline request until the returned handle is notified.
    pub fn gate_timeline(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.timeline_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn lookups(&self) -> Vec<Vec<UserId>> {
        self.calls.lock().unwrap().lookups.clone()
    }

    pub fn posted(&self) -> Vec<String> {
        self.calls.lock().unwrap().posted.clone()
    }

    fn check(&self, endpoint: &'static str) -> Result<()> {
        if self.failing.contains(endpoint) {
            return Err(Error::api("500", format!("{} unavailable", endpoint)));
        }
        Ok(())
    }
}

#[async_trait]
impl SocialApi for FakeApi {
    async fn verify_credentials(&self) -> Result<User> {
        self.check("account")?;
        Ok(self.account.clone())
    }

    async fn friends(&self, count: u32) -> Result<Vec<User>> {
        self.check("friends")?;
        Ok(self.friends.iter().take(count as usize).cloned().collect())
    }

    async fn user_timeline(&self, count: u32) -> Result<Vec<Tweet>> {
        let gate = self.timeline_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check("timeline")?;
        Ok(self.timeline.iter().take(count as usize).cloned().collect())
    }

    async fn message_events(&self, count: u32) -> Result<Vec<MessageEvent>> {
        self.check("events")?;
        Ok(self.events.iter().take(count as usize).cloned().collect())
    }

    async fn lookup_users(&self, ids: &[UserId]) -> Result<Vec<User>> {
        self.calls.lock().unwrap().lookups.push(ids.to_vec());
        self.check("lookup")?;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn update_status(&self, status: &str) -> Result<Tweet> {
        self.check("update")?;
        self.calls.lock().unwrap().posted.push(status.to_owned());

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(Tweet {
            id: format!("new-{}", next_id).into(),
            text: status.to_owned(),
            created_at: self
                .post_created_at
                .unwrap_or("Thu Oct 11 08:00:00 +0000 2018")
                .into(),
            user: Some(self.account.clone()),
            ..Default::default()
        })
    }
}
