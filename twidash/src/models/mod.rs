//! Data models for platform entities.

mod ids;
mod message;
mod time;
mod tweet;
mod user;

pub use ids::{EventId, TweetId, UserId};
pub use message::{EventsPage, MessageCreate, MessageData, MessageEvent, MessageTarget};
pub use time::{CreatedAt, TimeFormatter, DEFAULT_TIME_PATTERN, PLATFORM_DATE_FORMAT};
pub use tweet::Tweet;
pub use user::{FriendsPage, User};
