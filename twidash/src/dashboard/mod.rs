//! Dashboard core: aggregation, chat-buddy resolution, timestamps, service.

mod aggregator;
mod buddy;
mod normalize;
mod service;
mod source;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::aggregate;
pub use buddy::resolve_chat_buddy;
pub use normalize::{normalize, normalize_message, normalize_tweet};
pub use service::{Dashboard, PostOutcome};
pub use source::SocialApi;
pub use view::{DashboardConfig, ViewModel, DEFAULT_DISPLAY_COUNT};
