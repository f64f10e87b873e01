// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the classroom attendance backend.
//!
//! Built on Diesel over `SQLite`. Schema changes ship as embedded
//! migrations that run when a connection is opened.
//!
//! ## Storage Conventions
//!
//! - Instants are stored as RFC 3339 UTC text with millisecond precision
//! - Attendance rows also store their local calendar day (`YYYY-MM-DD`)
//! - Unique indexes reject a second daily log per `(usn, day)`, a second
//!   period-wise log per `(usn, period, day)`, and a second admin per email
//! - Passwords are stored only as bcrypt hashes
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own isolated
//! database, so tests never share state.

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

use attendance_domain::{
    AttendanceLog, DayBounds, NewAttendanceLog, NewPeriodwiseAttendanceLog, NewStudent, Period,
    PeriodwiseAttendanceLog, Student,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::MIGRATIONS;
pub use data_models::AdminData;
pub use error::PersistenceError;
pub use mutations::PASSWORD_HASH_COST;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for students, attendance logs and admins.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Shared-cache name unique per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_attendance_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // Better read concurrency for file databases
        backend::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Students
    // ========================================================================

    /// Inserts a validated enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_student(&mut self, student: NewStudent) -> Result<Student, PersistenceError> {
        mutations::insert_student(&mut self.conn, student)
    }

    /// Lists every student, most recent enrollment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_students(&mut self) -> Result<Vec<Student>, PersistenceError> {
        queries::list_students(&mut self.conn)
    }

    /// Finds the earliest enrollment for `usn`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_student_by_usn(&mut self, usn: &str) -> Result<Option<Student>, PersistenceError> {
        queries::find_student_by_usn(&mut self.conn, usn)
    }

    // ========================================================================
    // Attendance
    // ========================================================================

    /// Inserts a daily attendance log.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` on a same-day duplicate.
    pub fn insert_attendance_log(
        &mut self,
        log: NewAttendanceLog,
    ) -> Result<AttendanceLog, PersistenceError> {
        mutations::insert_attendance_log(&mut self.conn, log)
    }

    /// Finds the daily log for `usn` within `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_attendance_in_day(
        &mut self,
        usn: &str,
        day: &DayBounds,
    ) -> Result<Option<AttendanceLog>, PersistenceError> {
        queries::find_attendance_in_day(&mut self.conn, usn, day)
    }

    /// Lists every daily attendance log, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_attendance_logs(&mut self) -> Result<Vec<AttendanceLog>, PersistenceError> {
        queries::list_attendance_logs(&mut self.conn)
    }

    /// Inserts a period-wise attendance log.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` on a same-day duplicate.
    pub fn insert_periodwise_attendance_log(
        &mut self,
        log: NewPeriodwiseAttendanceLog,
    ) -> Result<PeriodwiseAttendanceLog, PersistenceError> {
        mutations::insert_periodwise_attendance_log(&mut self.conn, log)
    }

    /// Finds the log for `(usn, period)` within `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_periodwise_attendance_in_day(
        &mut self,
        usn: &str,
        period: Period,
        day: &DayBounds,
    ) -> Result<Option<PeriodwiseAttendanceLog>, PersistenceError> {
        queries::find_periodwise_attendance_in_day(&mut self.conn, usn, period, day)
    }

    /// Lists every period-wise attendance log, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_periodwise_attendance_logs(
        &mut self,
    ) -> Result<Vec<PeriodwiseAttendanceLog>, PersistenceError> {
        queries::list_periodwise_attendance_logs(&mut self.conn)
    }

    // ========================================================================
    // Admins
    // ========================================================================

    /// Creates an admin, storing only the password hash.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the email is taken.
    pub fn create_admin(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_admin(&mut self.conn, username, email, password)
    }

    /// Retrieves an admin by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_admin_by_email(&mut self, email: &str) -> Result<Option<AdminData>, PersistenceError> {
        queries::get_admin_by_email(&mut self.conn, email)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::verify_password(password, password_hash)
    }
}
