// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for the classroom attendance backend.
//!
//! Everything here is pure: no I/O, no clock reads. Callers pass the current
//! instant in explicitly.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod calendar;
mod error;
mod period;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{AttendanceCalendar, DayBounds, TimestampInput};
pub use error::DomainError;
pub use period::{PERIOD_SCHEDULE, Period, resolve_period};
pub use timestamp::{format_timestamp, parse_timestamp, serialize_record_id, serialize_timestamp};
pub use types::{
    AdminIdentity, AttendanceLog, NewAttendanceLog, NewPeriodwiseAttendanceLog, NewStudent,
    PeriodwiseAttendanceLog, Student,
};
pub use validation::{
    EnrollmentFields, manual_identity, require_field, require_secret, require_usn,
    validate_enrollment,
};
