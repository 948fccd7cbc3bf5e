//! API modules.

mod account;
mod message;
mod status;
mod user;

pub use account::AccountApi;
pub use message::{EventsBuilder, MessageApi};
pub use status::{validate_status, StatusApi, TimelineBuilder, UpdateBuilder};
pub use user::{FriendsBuilder, UserApi, MAX_LOOKUP_IDS};
