// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::period::Period;
use crate::timestamp::{serialize_record_id, serialize_timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// An enrolled student.
///
/// `usn` is the business key linking attendance logs to enrollments. It is
/// not unique: enrolling the same `usn` twice produces two records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-assigned identifier.
    #[serde(rename = "_id", serialize_with = "serialize_record_id")]
    pub id: i64,
    /// The student's name.
    pub name: String,
    /// The student's identifying code.
    pub usn: String,
    /// Age, as entered.
    pub age: String,
    /// Course of study.
    pub course: String,
    /// Contact phone number, as entered.
    pub phone: String,
    /// When the enrollment was recorded. Immutable.
    #[serde(serialize_with = "serialize_timestamp")]
    pub enrolled_at: DateTime<Utc>,
}

/// A validated enrollment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub usn: String,
    pub age: String,
    pub course: String,
    pub phone: String,
    pub enrolled_at: DateTime<Utc>,
}

impl NewStudent {
    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            usn: self.usn,
            age: self.age,
            course: self.course,
            phone: self.phone,
            enrolled_at: self.enrolled_at,
        }
    }
}

/// A daily attendance entry.
///
/// `name` and `course` are copied from the student at write time, or taken
/// from the request when no student record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLog {
    #[serde(rename = "_id", serialize_with = "serialize_record_id")]
    pub id: i64,
    pub usn: String,
    pub name: String,
    pub course: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub recognized_at: DateTime<Utc>,
}

/// A daily attendance entry ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceLog {
    pub usn: String,
    pub name: String,
    pub course: String,
    pub recognized_at: DateTime<Utc>,
    /// Local calendar date of `recognized_at`; at most one entry per
    /// `(usn, attendance_day)`.
    pub attendance_day: NaiveDate,
}

impl NewAttendanceLog {
    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_log(self, id: i64) -> AttendanceLog {
        AttendanceLog {
            id,
            usn: self.usn,
            name: self.name,
            course: self.course,
            recognized_at: self.recognized_at,
        }
    }
}

/// A period-wise attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodwiseAttendanceLog {
    #[serde(rename = "_id", serialize_with = "serialize_record_id")]
    pub id: i64,
    pub usn: String,
    pub name: String,
    pub course: String,
    pub period: Period,
    #[serde(serialize_with = "serialize_timestamp")]
    pub recognized_at: DateTime<Utc>,
}

/// A period-wise attendance entry ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPeriodwiseAttendanceLog {
    pub usn: String,
    pub name: String,
    pub course: String,
    /// Always a class period, never [`Period::NoPeriod`].
    pub period: Period,
    pub recognized_at: DateTime<Utc>,
    /// At most one entry per `(usn, period, attendance_day)`.
    pub attendance_day: NaiveDate,
}

impl NewPeriodwiseAttendanceLog {
    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_log(self, id: i64) -> PeriodwiseAttendanceLog {
        PeriodwiseAttendanceLog {
            id,
            usn: self.usn,
            name: self.name,
            course: self.course,
            period: self.period,
            recognized_at: self.recognized_at,
        }
    }
}

/// The non-secret identity of an admin, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub username: String,
    pub email: String,
}
