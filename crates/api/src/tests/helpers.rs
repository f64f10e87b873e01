// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use attendance_domain::{
    AttendanceCalendar, AttendanceLog, DayBounds, NewAttendanceLog, NewPeriodwiseAttendanceLog,
    NewStudent, Period, PeriodwiseAttendanceLog, Student, TimestampInput,
};
use attendance_persistence::{AdminData, Persistence, PersistenceError};
use chrono::{DateTime, TimeZone, Utc};

use crate::request_response::{EnrollStudentRequest, LogAttendanceRequest};
use crate::{AttendanceStore, enroll_student};

pub fn create_test_calendar() -> AttendanceCalendar {
    AttendanceCalendar::utc()
}

/// 2024-01-01 at the given UTC time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0)
        .single()
        .expect("valid test instant")
}

pub fn timestamp(text: &str) -> Option<TimestampInput> {
    Some(TimestampInput::Text(text.to_string()))
}

pub fn create_test_enrollment(usn: &str) -> EnrollStudentRequest {
    EnrollStudentRequest {
        name: Some(String::from("A")),
        usn: Some(usn.to_string()),
        age: Some(String::from("20")),
        course: Some(String::from("CS")),
        phone: Some(String::from("555")),
    }
}

pub fn create_test_attendance(usn: &str, recognized_at: &str) -> LogAttendanceRequest {
    LogAttendanceRequest {
        usn: Some(usn.to_string()),
        name: None,
        course: None,
        recognized_at: timestamp(recognized_at),
    }
}

/// A fresh in-memory store with student `usn` ("A", "CS") enrolled.
pub fn store_with_student(usn: &str) -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    enroll_student(&mut persistence, &create_test_enrollment(usn), at(8, 0)).unwrap();
    persistence
}

/// A store whose every operation fails, for exercising internal-error paths.
pub struct FailingStore;

fn broken() -> PersistenceError {
    PersistenceError::DatabaseError(String::from("disk I/O error"))
}

impl AttendanceStore for FailingStore {
    fn insert_student(&mut self, _student: NewStudent) -> Result<Student, PersistenceError> {
        Err(broken())
    }

    fn list_students(&mut self) -> Result<Vec<Student>, PersistenceError> {
        Err(broken())
    }

    fn find_student_by_usn(&mut self, _usn: &str) -> Result<Option<Student>, PersistenceError> {
        Err(broken())
    }

    fn insert_attendance_log(
        &mut self,
        _log: NewAttendanceLog,
    ) -> Result<AttendanceLog, PersistenceError> {
        Err(broken())
    }

    fn find_attendance_in_day(
        &mut self,
        _usn: &str,
        _day: &DayBounds,
    ) -> Result<Option<AttendanceLog>, PersistenceError> {
        Err(broken())
    }

    fn list_attendance_logs(&mut self) -> Result<Vec<AttendanceLog>, PersistenceError> {
        Err(broken())
    }

    fn insert_periodwise_attendance_log(
        &mut self,
        _log: NewPeriodwiseAttendanceLog,
    ) -> Result<PeriodwiseAttendanceLog, PersistenceError> {
        Err(broken())
    }

    fn find_periodwise_attendance_in_day(
        &mut self,
        _usn: &str,
        _period: Period,
        _day: &DayBounds,
    ) -> Result<Option<PeriodwiseAttendanceLog>, PersistenceError> {
        Err(broken())
    }

    fn list_periodwise_attendance_logs(
        &mut self,
    ) -> Result<Vec<PeriodwiseAttendanceLog>, PersistenceError> {
        Err(broken())
    }

    fn create_admin(
        &mut self,
        _username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<i64, PersistenceError> {
        Err(broken())
    }

    fn get_admin_by_email(&mut self, _email: &str) -> Result<Option<AdminData>, PersistenceError> {
        Err(broken())
    }

    fn verify_password(
        &self,
        _password: &str,
        _password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        Err(broken())
    }
}

/// A store that loses every race: lookups find no earlier record, then the
/// insert trips the unique index.
///
/// `find_student_by_usn` returns a student ("A", "CS") so both attendance
/// paths reach their insert.
pub struct RacingStore;

fn collided() -> PersistenceError {
    PersistenceError::UniqueViolation(String::from("UNIQUE constraint failed"))
}

impl AttendanceStore for RacingStore {
    fn insert_student(&mut self, student: NewStudent) -> Result<Student, PersistenceError> {
        Ok(student.into_student(1))
    }

    fn list_students(&mut self) -> Result<Vec<Student>, PersistenceError> {
        Ok(Vec::new())
    }

    fn find_student_by_usn(&mut self, usn: &str) -> Result<Option<Student>, PersistenceError> {
        Ok(Some(Student {
            id: 1,
            name: String::from("A"),
            usn: usn.to_string(),
            age: String::from("20"),
            course: String::from("CS"),
            phone: String::from("555"),
            enrolled_at: at(8, 0),
        }))
    }

    fn insert_attendance_log(
        &mut self,
        _log: NewAttendanceLog,
    ) -> Result<AttendanceLog, PersistenceError> {
        Err(collided())
    }

    fn find_attendance_in_day(
        &mut self,
        _usn: &str,
        _day: &DayBounds,
    ) -> Result<Option<AttendanceLog>, PersistenceError> {
        Ok(None)
    }

    fn list_attendance_logs(&mut self) -> Result<Vec<AttendanceLog>, PersistenceError> {
        Ok(Vec::new())
    }

    fn insert_periodwise_attendance_log(
        &mut self,
        _log: NewPeriodwiseAttendanceLog,
    ) -> Result<PeriodwiseAttendanceLog, PersistenceError> {
        Err(collided())
    }

    fn find_periodwise_attendance_in_day(
        &mut self,
        _usn: &str,
        _period: Period,
        _day: &DayBounds,
    ) -> Result<Option<PeriodwiseAttendanceLog>, PersistenceError> {
        Ok(None)
    }

    fn list_periodwise_attendance_logs(
        &mut self,
    ) -> Result<Vec<PeriodwiseAttendanceLog>, PersistenceError> {
        Ok(Vec::new())
    }

    fn create_admin(
        &mut self,
        _username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<i64, PersistenceError> {
        Err(collided())
    }

    fn get_admin_by_email(&mut self, _email: &str) -> Result<Option<AdminData>, PersistenceError> {
        Ok(None)
    }

    fn verify_password(
        &self,
        _password: &str,
        _password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        Ok(false)
    }
}
