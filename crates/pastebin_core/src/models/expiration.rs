//! Expiration policy: symbolic choice to absolute deadline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifetime chosen at paste creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Expiration {
    #[default]
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "10m")]
    TenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl Expiration {
    pub const ALL: [Expiration; 6] = [
        Expiration::Never,
        Expiration::TenMinutes,
        Expiration::OneHour,
        Expiration::OneDay,
        Expiration::SevenDays,
        Expiration::ThirtyDays,
    ];

    /// Symbolic code accepted on the wire (`never`, `10m`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Expiration::Never => "never",
            Expiration::TenMinutes => "10m",
            Expiration::OneHour => "1h",
            Expiration::OneDay => "1d",
            Expiration::SevenDays => "7d",
            Expiration::ThirtyDays => "30d",
        }
    }

    /// Human-readable label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Expiration::Never => "Never",
            Expiration::TenMinutes => "10 Minutes",
            Expiration::OneHour => "1 Hour",
            Expiration::OneDay => "1 Day",
            Expiration::SevenDays => "7 Days",
            Expiration::ThirtyDays => "30 Days",
        }
    }

    /// Fixed lifetime, or `None` for pastes that never expire.
    pub fn duration(self) -> Option<Duration> {
        match self {
            Expiration::Never => None,
            Expiration::TenMinutes => Some(Duration::minutes(10)),
            Expiration::OneHour => Some(Duration::hours(1)),
            Expiration::OneDay => Some(Duration::days(1)),
            Expiration::SevenDays => Some(Duration::days(7)),
            Expiration::ThirtyDays => Some(Duration::days(30)),
        }
    }

    /// Absolute deadline for a paste created at `now`.
    ///
    /// # Returns
    /// `None` for [`Expiration::Never`], otherwise `now + duration`.
    pub fn expires_at(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|duration| now + duration)
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a string is not a known expiration code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExpiration(pub String);

impl fmt::Display for UnknownExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown expiration '{}'", self.0)
    }
}

impl std::error::Error for UnknownExpiration {}

impl FromStr for Expiration {
    type Err = UnknownExpiration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expiration::ALL
            .into_iter()
            .find(|expiration| expiration.code() == s)
            .ok_or_else(|| UnknownExpiration(s.to_string()))
    }
}
