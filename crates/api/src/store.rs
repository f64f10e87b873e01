// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage seam used by the handlers.
//!
//! Handlers are written against [`AttendanceStore`] rather than a concrete
//! database, so they run unchanged against `Persistence` or a test double.

use attendance_domain::{
    AttendanceLog, DayBounds, NewAttendanceLog, NewPeriodwiseAttendanceLog, NewStudent, Period,
    PeriodwiseAttendanceLog, Student,
};
use attendance_persistence::{AdminData, Persistence, PersistenceError};

/// Everything the attendance handlers need from storage.
pub trait AttendanceStore {
    /// Inserts a validated enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_student(&mut self, student: NewStudent) -> Result<Student, PersistenceError>;

    /// Lists every student, most recent enrollment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_students(&mut self) -> Result<Vec<Student>, PersistenceError>;

    /// Finds the earliest enrollment for `usn`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_student_by_usn(&mut self, usn: &str) -> Result<Option<Student>, PersistenceError>;

    /// Inserts a daily attendance log.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` on a same-day duplicate.
    fn insert_attendance_log(
        &mut self,
        log: NewAttendanceLog,
    ) -> Result<AttendanceLog, PersistenceError>;

    /// Finds the daily log for `usn` within `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_attendance_in_day(
        &mut self,
        usn: &str,
        day: &DayBounds,
    ) -> Result<Option<AttendanceLog>, PersistenceError>;

    /// Lists every daily attendance log, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_attendance_logs(&mut self) -> Result<Vec<AttendanceLog>, PersistenceError>;

    /// Inserts a period-wise attendance log.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` on a same-day duplicate.
    fn insert_periodwise_attendance_log(
        &mut self,
        log: NewPeriodwiseAttendanceLog,
    ) -> Result<PeriodwiseAttendanceLog, PersistenceError>;

    /// Finds the log for `(usn, period)` within `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_periodwise_attendance_in_day(
        &mut self,
        usn: &str,
        period: Period,
        day: &DayBounds,
    ) -> Result<Option<PeriodwiseAttendanceLog>, PersistenceError>;

    /// Lists every period-wise attendance log, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_periodwise_attendance_logs(
        &mut self,
    ) -> Result<Vec<PeriodwiseAttendanceLog>, PersistenceError>;

    /// Creates an admin, hashing the password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the email is taken.
    fn create_admin(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, PersistenceError>;

    /// Retrieves an admin by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_admin_by_email(&mut self, email: &str) -> Result<Option<AdminData>, PersistenceError>;

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError>;
}

impl AttendanceStore for Persistence {
    fn insert_student(&mut self, student: NewStudent) -> Result<Student, PersistenceError> {
        Self::insert_student(self, student)
    }

    fn list_students(&mut self) -> Result<Vec<Student>, PersistenceError> {
        Self::list_students(self)
    }

    fn find_student_by_usn(&mut self, usn: &str) -> Result<Option<Student>, PersistenceError> {
        Self::find_student_by_usn(self, usn)
    }

    fn insert_attendance_log(
        &mut self,
        log: NewAttendanceLog,
    ) -> Result<AttendanceLog, PersistenceError> {
        Self::insert_attendance_log(self, log)
    }

    fn find_attendance_in_day(
        &mut self,
        usn: &str,
        day: &DayBounds,
    ) -> Result<Option<AttendanceLog>, PersistenceError> {
        Self::find_attendance_in_day(self, usn, day)
    }

    fn list_attendance_logs(&mut self) -> Result<Vec<AttendanceLog>, PersistenceError> {
        Self::list_attendance_logs(self)
    }

    fn insert_periodwise_attendance_log(
        &mut self,
        log: NewPeriodwiseAttendanceLog,
    ) -> Result<PeriodwiseAttendanceLog, PersistenceError> {
        Self::insert_periodwise_attendance_log(self, log)
    }

    fn find_periodwise_attendance_in_day(
        &mut self,
        usn: &str,
        period: Period,
        day: &DayBounds,
    ) -> Result<Option<PeriodwiseAttendanceLog>, PersistenceError> {
        Self::find_periodwise_attendance_in_day(self, usn, period, day)
    }

    fn list_periodwise_attendance_logs(
        &mut self,
    ) -> Result<Vec<PeriodwiseAttendanceLog>, PersistenceError> {
        Self::list_periodwise_attendance_logs(self)
    }

    fn create_admin(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        Self::create_admin(self, username, email, password)
    }

    fn get_admin_by_email(&mut self, email: &str) -> Result<Option<AdminData>, PersistenceError> {
        Self::get_admin_by_email(self, email)
    }

    fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        Self::verify_password(self, password, password_hash)
    }
}
