// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use attendance_domain::{NewStudent, Student, format_timestamp};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::students;
use crate::error::PersistenceError;

/// Inserts a validated enrollment and returns the stored student.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_student(
    conn: &mut SqliteConnection,
    student: NewStudent,
) -> Result<Student, PersistenceError> {
    diesel::insert_into(students::table)
        .values((
            students::usn.eq(&student.usn),
            students::name.eq(&student.name),
            students::age.eq(&student.age),
            students::course.eq(&student.course),
            students::phone.eq(&student.phone),
            students::enrolled_at.eq(format_timestamp(&student.enrolled_at)),
        ))
        .execute(conn)?;

    let student_id: i64 = get_last_insert_rowid(conn)?;

    info!(student_id, usn = %student.usn, "Student enrolled");

    Ok(student.into_student(student_id))
}
