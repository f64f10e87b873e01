// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class period schedule.
//!
//! Each class period owns a single wall-clock hour. A time belongs to the
//! period when its hour matches and its minute is at or past the period's
//! opening minute. Rows are evaluated in order and the first match wins.
//!
//! | Hour | Minute ≥ | Period       |
//! |------|----------|--------------|
//! | 9    | 0        | `Java`       |
//! | 10   | 10       | `Python`     |
//! | 11   | 20       | `Networking` |
//! | 12   | 30       | `AI/ML`      |
//! | 18   | 30       | `React`      |
//!
//! Minutes before the opening minute of an hour (for example 10:00-10:09)
//! resolve to [`Period::NoPeriod`]. Existing clients rely on that gap, so it
//! stays.

use crate::error::DomainError;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named class period, or the sentinel for times outside the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "Java")]
    Java,
    #[serde(rename = "Python")]
    Python,
    #[serde(rename = "Networking")]
    Networking,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "React")]
    React,
    /// Sentinel for times that match no schedule row.
    #[serde(rename = "No Period")]
    NoPeriod,
}

/// The schedule table: `(hour, opening minute, period)`.
pub const PERIOD_SCHEDULE: [(u32, u32, Period); 5] = [
    (9, 0, Period::Java),
    (10, 10, Period::Python),
    (11, 20, Period::Networking),
    (12, 30, Period::AiMl),
    (18, 30, Period::React),
];

impl Period {
    /// Returns the label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Python => "Python",
            Self::Networking => "Networking",
            Self::AiMl => "AI/ML",
            Self::React => "React",
            Self::NoPeriod => "No Period",
        }
    }

    /// Returns `true` for every period except the sentinel.
    #[must_use]
    pub const fn is_class(&self) -> bool {
        !matches!(self, Self::NoPeriod)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Java" => Ok(Self::Java),
            "Python" => Ok(Self::Python),
            "Networking" => Ok(Self::Networking),
            "AI/ML" => Ok(Self::AiMl),
            "React" => Ok(Self::React),
            "No Period" => Ok(Self::NoPeriod),
            _ => Err(DomainError::UnknownPeriod(s.to_string())),
        }
    }
}

/// Maps a local wall-clock time to its class period.
///
/// The argument is already in the server's local time; see
/// [`crate::AttendanceCalendar::resolve_period`] for the instant-based entry
/// point.
#[must_use]
pub fn resolve_period<T: Timelike>(local_time: &T) -> Period {
    let hour: u32 = local_time.hour();
    let minute: u32 = local_time.minute();

    PERIOD_SCHEDULE
        .iter()
        .find(|(period_hour, opening_minute, _)| {
            hour == *period_hour && minute >= *opening_minute
        })
        .map_or(Period::NoPeriod, |(_, _, period)| *period)
}
