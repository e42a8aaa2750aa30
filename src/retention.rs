//! Time Threshold Resolution
//!
//! Converts the symbolic retention-age selector into an absolute cutoff
//! instant (milliseconds since the Unix epoch). The selector set is closed:
//! it deserializes from the fixed set of strings the configuration layer is
//! allowed to store, so an unknown selector cannot reach the resolver.

use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 1000 * 60;
const HOUR_MS: i64 = MINUTE_MS * 60;
const DAY_MS: i64 = HOUR_MS * 24;

/// Symbolic retention age for one clear operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetentionPeriod {
    /// Clear for all time.
    #[serde(rename = "epoch")]
    Epoch,
    #[serde(rename = "1minute")]
    OneMinute,
    #[serde(rename = "3minutes")]
    ThreeMinutes,
    #[serde(rename = "10minutes")]
    TenMinutes,
    #[serde(rename = "30minutes")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "3hours")]
    ThreeHours,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "4weeks")]
    FourWeeks,
    #[serde(rename = "90days")]
    NinetyDays,
    #[serde(rename = "365days")]
    OneYear,
}

impl RetentionPeriod {
    /// Age of the period in milliseconds. `Epoch` has no finite age.
    pub fn age_ms(self) -> Option<i64> {
        match self {
            Self::Epoch => None,
            Self::OneMinute => Some(MINUTE_MS),
            Self::ThreeMinutes => Some(MINUTE_MS * 3),
            Self::TenMinutes => Some(MINUTE_MS * 10),
            Self::ThirtyMinutes => Some(MINUTE_MS * 30),
            Self::OneHour => Some(HOUR_MS),
            Self::ThreeHours => Some(HOUR_MS * 3),
            Self::OneDay => Some(DAY_MS),
            Self::OneWeek => Some(DAY_MS * 7),
            Self::FourWeeks => Some(DAY_MS * 7 * 4),
            Self::NinetyDays => Some(DAY_MS * 90),
            Self::OneYear => Some(DAY_MS * 365),
        }
    }

    /// Resolve the cutoff instant relative to `now_ms`.
    ///
    /// `Epoch` resolves to 0 (clear all time); every other selector resolves
    /// to `now - age`, exact to the table value.
    pub fn since_ms(self, now_ms: i64) -> i64 {
        match self.age_ms() {
            None => 0,
            Some(age) => now_ms - age,
        }
    }
}
