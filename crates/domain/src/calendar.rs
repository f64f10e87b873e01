// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local calendar used for period lookup and daily de-duplication.
//!
//! ## Invariants
//!
//! - Instants are carried as UTC everywhere outside this module
//! - A calendar day is local midnight to the next local midnight, `[start, end)`
//! - Period lookup uses the local wall-clock hour and minute
//! - Local times that fall into a DST gap are shifted forward by one hour
//! - Ambiguous local times (DST fold) resolve to the earlier instant
//! - Client instants must fall in UTC years 0000-9999, the range the
//!   canonical timestamp text can represent

use crate::error::DomainError;
use crate::period::{Period, resolve_period};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::ops::RangeInclusive;

/// Formats accepted for local date-times without an offset.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// UTC years whose instants format as fixed-width canonical text.
const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// A client-supplied timestamp, before interpretation.
///
/// Clients send either text or a number of milliseconds since the Unix
/// epoch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TimestampInput {
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// A textual timestamp.
    Text(String),
}

impl TimestampInput {
    /// Returns `true` for values clients send to mean "now": blank text or
    /// zero.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        match self {
            Self::EpochMillis(millis) => *millis == 0,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

/// The `[start, end)` window of one local calendar day, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    /// The local calendar date.
    pub day: NaiveDate,
    /// Local midnight at the start of the day.
    pub start: DateTime<Utc>,
    /// Local midnight at the start of the following day.
    pub end: DateTime<Utc>,
}

impl DayBounds {
    /// Returns whether an instant falls inside this day.
    #[must_use]
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

/// The timezone the school operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceCalendar {
    /// Whatever timezone the host is configured with.
    #[default]
    SystemLocal,
    /// An explicit IANA timezone.
    Zone(Tz),
}

impl AttendanceCalendar {
    /// A calendar pinned to UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self::Zone(Tz::UTC)
    }

    /// Builds a calendar from an IANA timezone name such as `Asia/Kolkata`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known timezone.
    pub fn from_timezone_name(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self::Zone)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Human-readable name of the configured zone.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::SystemLocal => String::from("system local"),
            Self::Zone(tz) => tz.name().to_string(),
        }
    }

    /// Converts an instant to local wall-clock time.
    #[must_use]
    pub fn local_datetime(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::SystemLocal => instant.with_timezone(&Local).naive_local(),
            Self::Zone(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Returns the local calendar date of an instant.
    #[must_use]
    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    /// Resolves the class period an instant falls in.
    #[must_use]
    pub fn resolve_period(&self, instant: &DateTime<Utc>) -> Period {
        resolve_period(&self.local_datetime(instant))
    }

    /// Returns the local calendar day containing an instant.
    #[must_use]
    pub fn day_bounds(&self, instant: &DateTime<Utc>) -> DayBounds {
        let day: NaiveDate = self.local_date(instant);
        let next_day: NaiveDate = day.succ_opt().unwrap_or(NaiveDate::MAX);

        DayBounds {
            day,
            start: self.local_midnight(day),
            end: self.local_midnight(next_day),
        }
    }

    /// Converts a local wall-clock time to a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the local time cannot be represented in this zone.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, DomainError> {
        let resolved: Option<DateTime<Utc>> = match self {
            Self::SystemLocal => local_to_utc(&Local, local),
            Self::Zone(tz) => local_to_utc(tz, local),
        };
        resolved.ok_or_else(|| DomainError::InvalidTimestamp(local.to_string()))
    }

    /// Interprets a client timestamp.
    ///
    /// Accepted forms:
    /// - epoch milliseconds
    /// - RFC 3339 with an explicit offset or `Z`
    /// - local date-time without an offset (`2024-01-01T09:05`), read in this zone
    /// - a bare date (`2024-01-01`), read as UTC midnight
    ///
    /// # Errors
    ///
    /// Returns an error if the input matches none of the accepted forms, or
    /// if it lands outside UTC years 0000-9999.
    pub fn parse_input(&self, input: &TimestampInput) -> Result<DateTime<Utc>, DomainError> {
        let (instant, raw): (Option<DateTime<Utc>>, String) = match input {
            TimestampInput::EpochMillis(millis) => {
                (DateTime::from_timestamp_millis(*millis), millis.to_string())
            }
            TimestampInput::Text(text) => (Some(self.parse_text(text)?), text.clone()),
        };

        instant
            .filter(|parsed| STORABLE_YEARS.contains(&parsed.year()))
            .ok_or(DomainError::InvalidTimestamp(raw))
    }

    /// Returns the supplied timestamp if present, otherwise `now`.
    ///
    /// Blank text and zero count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied timestamp cannot be interpreted.
    pub fn resolve_instant(
        &self,
        input: Option<&TimestampInput>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, DomainError> {
        input
            .filter(|value| !value.is_unset())
            .map_or(Ok(now), |value| self.parse_input(value))
    }

    fn parse_text(&self, text: &str) -> Result<DateTime<Utc>, DomainError> {
        let trimmed: &str = text.trim();

        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(with_offset.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, format) {
                return self.to_utc(local);
            }
        }

        // Bare dates are UTC, as in JavaScript's Date constructor.
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }

        Err(DomainError::InvalidTimestamp(text.to_string()))
    }

    fn local_midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        let midnight: NaiveDateTime = day.and_time(chrono::NaiveTime::MIN);
        self.to_utc(midnight).unwrap_or_else(|_| midnight.and_utc())
    }
}

fn local_to_utc<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            local
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| zone.from_local_datetime(&shifted).earliest())
        })
        .map(|resolved| resolved.with_timezone(&Utc))
}
