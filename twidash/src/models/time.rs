//! Creation timestamps and their display form.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{Error, Result};

/// Default display pattern, rendered in UTC.
pub const DEFAULT_TIME_PATTERN: &str = "%b %-d, %Y %H:%M";

/// Date form the platform uses for `created_at` on statuses and users.
pub const PLATFORM_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A creation timestamp, either as delivered or already formatted.
///
/// Deserializing always yields [`CreatedAt::Raw`]; serializing emits the
/// inner string of either form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedAt {
    /// As delivered by the platform.
    Raw(String),
    /// Human-readable display string.
    Display(String),
}

impl CreatedAt {
    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        match self {
            CreatedAt::Raw(s) | CreatedAt::Display(s) => s,
        }
    }

    /// Check whether this timestamp has been formatted.
    pub fn is_display(&self) -> bool {
        matches!(self, CreatedAt::Display(_))
    }
}

impl Default for CreatedAt {
    fn default() -> Self {
        CreatedAt::Raw(String::new())
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CreatedAt {
    fn from(s: &str) -> Self {
        CreatedAt::Raw(s.to_owned())
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(CreatedAt::Raw)
    }
}

/// Converts platform timestamps into display strings.
///
/// Output depends only on the input and the pattern, never on the current
/// time, so the same raw value always formats the same way.
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    pattern: String,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_PATTERN.to_owned(),
        }
    }
}

impl TimeFormatter {
    /// Create a formatter with a custom strftime pattern.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidArgument(format!(
                "Invalid time pattern: {}",
                pattern
            )));
        }
        Ok(Self { pattern })
    }

    /// The strftime pattern in use.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format a platform date such as `Wed Oct 10 20:19:24 +0000 2018`.
    pub fn format_created_at(&self, raw: &str) -> Result<String> {
        let dt = DateTime::parse_from_str(raw.trim(), PLATFORM_DATE_FORMAT)
            .map_err(|e| Error::parse(format!("Bad created_at {:?}: {}", raw, e)))?;
        Ok(self.render(dt.with_timezone(&Utc)))
    }

    /// Format a decimal epoch-millisecond string.
    pub fn format_epoch_millis(&self, raw: &str) -> Result<String> {
        let millis: i64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::parse(format!("Bad epoch millis {:?}", raw)))?;
        let dt = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::parse(format!("Epoch millis out of range: {}", millis)))?;
        Ok(self.render(dt))
    }

    fn render(&self, dt: DateTime<Utc>) -> String {
        dt.format(&self.pattern).to_string()
    }
}
