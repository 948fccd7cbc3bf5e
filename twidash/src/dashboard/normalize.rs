//! Timestamp normalization for an aggregate view.

use crate::error::Result;
use crate::models::{CreatedAt, MessageEvent, TimeFormatter, Tweet};

use super::ViewModel;

/// Replace every raw status and message timestamp with its display form.
///
/// Entries that are already formatted are left as they are.
pub fn normalize(view: &mut ViewModel, formatter: &TimeFormatter) -> Result<()> {
    for tweet in &mut view.tweets {
        normalize_tweet(tweet, formatter)?;
    }
    for message in &mut view.messages {
        normalize_message(message, formatter)?;
    }
    Ok(())
}

/// Format a status's `created_at` platform date.
pub fn normalize_tweet(tweet: &mut Tweet, formatter: &TimeFormatter) -> Result<()> {
    if let CreatedAt::Raw(raw) = &tweet.created_at {
        let display = formatter.format_created_at(raw)?;
        tweet.created_at = CreatedAt::Display(display);
    }
    Ok(())
}

/// Format a message's epoch-millisecond `created_timestamp`.
pub fn normalize_message(message: &mut MessageEvent, formatter: &TimeFormatter) -> Result<()> {
    if let CreatedAt::Raw(raw) = &message.created_timestamp {
        let display = formatter.format_epoch_millis(raw)?;
        message.created_timestamp = CreatedAt::Display(display);
    }
    Ok(())
}
