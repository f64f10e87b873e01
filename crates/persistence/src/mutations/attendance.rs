// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance inserts.
//!
//! Both tables carry a unique index over the local `attendance_day`, so a
//! second entry for the same day fails with
//! [`PersistenceError::UniqueViolation`] even if two writers race past the
//! application-level check.

use attendance_domain::{
    AttendanceLog, NewAttendanceLog, NewPeriodwiseAttendanceLog, PeriodwiseAttendanceLog,
    format_timestamp,
};
use chrono::NaiveDate;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::{attendance_logs, periodwise_attendance_logs};
use crate::error::PersistenceError;

/// Stored form of a local calendar date.
fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Inserts a daily attendance log.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if `usn` already has a log for
/// the same day, or another error if the insert fails.
pub fn insert_attendance_log(
    conn: &mut SqliteConnection,
    log: NewAttendanceLog,
) -> Result<AttendanceLog, PersistenceError> {
    diesel::insert_into(attendance_logs::table)
        .values((
            attendance_logs::usn.eq(&log.usn),
            attendance_logs::name.eq(&log.name),
            attendance_logs::course.eq(&log.course),
            attendance_logs::recognized_at.eq(format_timestamp(&log.recognized_at)),
            attendance_logs::attendance_day.eq(day_key(log.attendance_day)),
        ))
        .execute(conn)?;

    let log_id: i64 = get_last_insert_rowid(conn)?;

    info!(log_id, usn = %log.usn, day = %log.attendance_day, "Attendance logged");

    Ok(log.into_log(log_id))
}

/// Inserts a period-wise attendance log.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if `(usn, period)` already has
/// a log for the same day, or another error if the insert fails.
pub fn insert_periodwise_attendance_log(
    conn: &mut SqliteConnection,
    log: NewPeriodwiseAttendanceLog,
) -> Result<PeriodwiseAttendanceLog, PersistenceError> {
    diesel::insert_into(periodwise_attendance_logs::table)
        .values((
            periodwise_attendance_logs::usn.eq(&log.usn),
            periodwise_attendance_logs::name.eq(&log.name),
            periodwise_attendance_logs::course.eq(&log.course),
            periodwise_attendance_logs::period.eq(log.period.as_str()),
            periodwise_attendance_logs::recognized_at.eq(format_timestamp(&log.recognized_at)),
            periodwise_attendance_logs::attendance_day.eq(day_key(log.attendance_day)),
        ))
        .execute(conn)?;

    let log_id: i64 = get_last_insert_rowid(conn)?;

    info!(
        log_id,
        usn = %log.usn,
        period = %log.period,
        day = %log.attendance_day,
        "Period-wise attendance logged"
    );

    Ok(log.into_log(log_id))
}
