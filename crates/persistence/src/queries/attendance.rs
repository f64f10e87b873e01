// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance queries.
//!
//! Day lookups compare stored `recognized_at` text against the canonical
//! text of the day bounds. The canonical form is fixed width, so the text
//! comparison matches instant order.

use attendance_domain::{
    AttendanceLog, DayBounds, Period, PeriodwiseAttendanceLog, format_timestamp, parse_timestamp,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{attendance_logs, periodwise_attendance_logs};
use crate::error::PersistenceError;

/// Diesel Queryable struct for daily attendance rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = attendance_logs)]
struct AttendanceLogRow {
    log_id: i64,
    usn: String,
    name: String,
    course: String,
    recognized_at: String,
}

/// Diesel Queryable struct for period-wise attendance rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = periodwise_attendance_logs)]
struct PeriodwiseAttendanceLogRow {
    log_id: i64,
    usn: String,
    name: String,
    course: String,
    period: String,
    recognized_at: String,
}

impl TryFrom<AttendanceLogRow> for AttendanceLog {
    type Error = PersistenceError;

    fn try_from(row: AttendanceLogRow) -> Result<Self, Self::Error> {
        let recognized_at = parse_timestamp(&row.recognized_at).map_err(|e| {
            PersistenceError::CorruptRecord {
                table: "attendance_logs",
                id: row.log_id,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            id: row.log_id,
            usn: row.usn,
            name: row.name,
            course: row.course,
            recognized_at,
        })
    }
}

impl TryFrom<PeriodwiseAttendanceLogRow> for PeriodwiseAttendanceLog {
    type Error = PersistenceError;

    fn try_from(row: PeriodwiseAttendanceLogRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            table: "periodwise_attendance_logs",
            id: row.log_id,
            reason,
        };

        let recognized_at =
            parse_timestamp(&row.recognized_at).map_err(|e| corrupt(e.to_string()))?;
        let period: Period = row
            .period
            .parse()
            .map_err(|e: attendance_domain::DomainError| corrupt(e.to_string()))?;

        Ok(Self {
            id: row.log_id,
            usn: row.usn,
            name: row.name,
            course: row.course,
            period,
            recognized_at,
        })
    }
}

/// Lists every daily attendance log, most recent first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_attendance_logs(
    conn: &mut SqliteConnection,
) -> Result<Vec<AttendanceLog>, PersistenceError> {
    debug!("Listing attendance logs");

    let rows: Vec<AttendanceLogRow> = attendance_logs::table
        .select(AttendanceLogRow::as_select())
        .order((
            attendance_logs::recognized_at.desc(),
            attendance_logs::log_id.desc(),
        ))
        .load(conn)?;

    rows.into_iter().map(AttendanceLog::try_from).collect()
}

/// Finds the daily log for `usn` recognized within `day`, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn find_attendance_in_day(
    conn: &mut SqliteConnection,
    usn: &str,
    day: &DayBounds,
) -> Result<Option<AttendanceLog>, PersistenceError> {
    let start: String = format_timestamp(&day.start);
    let end: String = format_timestamp(&day.end);

    debug!(
        "Looking up attendance for usn {} between {} and {}",
        usn, start, end
    );

    let row: Option<AttendanceLogRow> = attendance_logs::table
        .filter(attendance_logs::usn.eq(usn))
        .filter(attendance_logs::recognized_at.ge(&start))
        .filter(attendance_logs::recognized_at.lt(&end))
        .select(AttendanceLogRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AttendanceLog::try_from).transpose()
}

/// Lists every period-wise attendance log, most recent first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_periodwise_attendance_logs(
    conn: &mut SqliteConnection,
) -> Result<Vec<PeriodwiseAttendanceLog>, PersistenceError> {
    debug!("Listing period-wise attendance logs");

    let rows: Vec<PeriodwiseAttendanceLogRow> = periodwise_attendance_logs::table
        .select(PeriodwiseAttendanceLogRow::as_select())
        .order((
            periodwise_attendance_logs::recognized_at.desc(),
            periodwise_attendance_logs::log_id.desc(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(PeriodwiseAttendanceLog::try_from)
        .collect()
}

/// Finds the log for `(usn, period)` recognized within `day`, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn find_periodwise_attendance_in_day(
    conn: &mut SqliteConnection,
    usn: &str,
    period: Period,
    day: &DayBounds,
) -> Result<Option<PeriodwiseAttendanceLog>, PersistenceError> {
    let start: String = format_timestamp(&day.start);
    let end: String = format_timestamp(&day.end);

    debug!(
        "Looking up {} attendance for usn {} between {} and {}",
        period, usn, start, end
    );

    let row: Option<PeriodwiseAttendanceLogRow> = periodwise_attendance_logs::table
        .filter(periodwise_attendance_logs::usn.eq(usn))
        .filter(periodwise_attendance_logs::period.eq(period.as_str()))
        .filter(periodwise_attendance_logs::recognized_at.ge(&start))
        .filter(periodwise_attendance_logs::recognized_at.lt(&end))
        .select(PeriodwiseAttendanceLogRow::as_select())
        .first(conn)
        .optional()?;

    row.map(PeriodwiseAttendanceLog::try_from).transpose()
}
