// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student queries.

use attendance_domain::{Student, parse_timestamp};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::students;
use crate::error::PersistenceError;

/// Diesel Queryable struct for student rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
struct StudentRow {
    student_id: i64,
    usn: String,
    name: String,
    age: String,
    course: String,
    phone: String,
    enrolled_at: String,
}

impl TryFrom<StudentRow> for Student {
    type Error = PersistenceError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let enrolled_at = parse_timestamp(&row.enrolled_at).map_err(|e| {
            PersistenceError::CorruptRecord {
                table: "students",
                id: row.student_id,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            id: row.student_id,
            name: row.name,
            usn: row.usn,
            age: row.age,
            course: row.course,
            phone: row.phone,
            enrolled_at,
        })
    }
}

/// Lists every enrolled student, most recent enrollment first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_students(conn: &mut SqliteConnection) -> Result<Vec<Student>, PersistenceError> {
    debug!("Listing students");

    let rows: Vec<StudentRow> = students::table
        .select(StudentRow::as_select())
        .order((students::enrolled_at.desc(), students::student_id.desc()))
        .load(conn)?;

    rows.into_iter().map(Student::try_from).collect()
}

/// Finds a student by `usn`.
///
/// `usn` is not unique; the earliest enrollment wins.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if no student has this `usn`.
pub fn find_student_by_usn(
    conn: &mut SqliteConnection,
    usn: &str,
) -> Result<Option<Student>, PersistenceError> {
    debug!("Looking up student by usn: {}", usn);

    let row: Option<StudentRow> = students::table
        .filter(students::usn.eq(usn))
        .select(StudentRow::as_select())
        .order(students::student_id.asc())
        .first(conn)
        .optional()?;

    row.map(Student::try_from).transpose()
}
