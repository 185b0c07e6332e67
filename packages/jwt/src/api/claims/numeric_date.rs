//! Seconds since the epoch, as used by `exp`, `iat` and `nbf`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON numeric date: whole seconds since 1970-01-01T00:00:00Z
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericDate {
    value: i64,
}

impl NumericDate {
    /// The current time, truncated to seconds
    #[must_use]
    pub fn now() -> Self {
        Self::from_seconds(Utc::now().timestamp())
    }

    /// From seconds since the epoch
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { value: seconds }
    }

    /// From milliseconds since the epoch, truncated to seconds
    #[must_use]
    pub const fn from_milliseconds(millis: i64) -> Self {
        Self::from_seconds(millis / 1000)
    }

    /// Seconds since the epoch
    #[must_use]
    pub const fn value(self) -> i64 {
        self.value
    }

    /// Milliseconds since the epoch
    #[must_use]
    pub const fn value_in_millis(self) -> i64 {
        self.value.saturating_mul(1000)
    }

    /// This date moved by `seconds`, which may be negative
    #[must_use]
    pub const fn add_seconds(self, seconds: i64) -> Self {
        Self::from_seconds(self.value.saturating_add(seconds))
    }

    /// Strictly earlier than `when`
    #[must_use]
    pub fn is_before(self, when: Self) -> bool {
        self < when
    }

    /// At or after `when`
    #[must_use]
    pub fn is_on_or_after(self, when: Self) -> bool {
        self >= when
    }

    /// Strictly later than `when`
    #[must_use]
    pub fn is_after(self, when: Self) -> bool {
        self > when
    }
}

impl fmt::Display for NumericDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.value, 0) {
            Some(instant) => write!(f, "NumericDate{{{} -> {}}}", self.value, instant.to_rfc3339()),
            None => write!(f, "NumericDate{{{}}}", self.value),
        }
    }
}

impl From<i64> for NumericDate {
    fn from(seconds: i64) -> Self {
        Self::from_seconds(seconds)
    }
}
