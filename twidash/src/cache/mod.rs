//! In-process view cache.

mod view;

pub use view::{RefreshTicket, ViewCache};
