//! Lifecycle of a token offering.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

/// Where an offering stands at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingStatus {
    Upcoming,
    Live,
    Finished,
    SoldOut,
}

impl fmt::Display for OfferingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferingStatus::Upcoming => write!(f, "upcoming"),
            OfferingStatus::Live => write!(f, "live"),
            OfferingStatus::Finished => write!(f, "finished"),
            OfferingStatus::SoldOut => write!(f, "sold out"),
        }
    }
}

/// Sale window of an offering. Without an end the sale never finishes on
/// its own, only by selling out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferingWindow {
    pub go_live: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl OfferingWindow {
    pub fn new(go_live: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        OfferingWindow { go_live, end }
    }

    /// Builds a window from unix seconds, the way bonding accounts store
    /// their go-live time. Returns `None` for out-of-range timestamps.
    pub fn from_unix(go_live_unix_time: i64, end_unix_time: Option<i64>) -> Option<Self> {
        let go_live = Utc.timestamp_opt(go_live_unix_time, 0).single()?;
        let end = match end_unix_time {
            Some(end) => Some(Utc.timestamp_opt(end, 0).single()?),
            None => None,
        };
        Some(OfferingWindow { go_live, end })
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.go_live <= now
    }

    /// `num_remaining` is what is left under the supply cap, in human units.
    /// Selling out takes precedence over the clock.
    pub fn status_at(&self, now: DateTime<Utc>, num_remaining: Option<f64>) -> OfferingStatus {
        if matches!(num_remaining, Some(remaining) if remaining <= 0.0) {
            return OfferingStatus::SoldOut;
        }
        if now < self.go_live {
            return OfferingStatus::Upcoming;
        }
        match self.end {
            Some(end) if now >= end => OfferingStatus::Finished,
            _ => OfferingStatus::Live,
        }
    }
}
