// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod initialization_tests;

use attendance_domain::{NewAttendanceLog, NewPeriodwiseAttendanceLog, NewStudent, Period};
use chrono::{DateTime, TimeZone, Utc};

/// Builds a UTC instant on 2024-01-01 at the given time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    on(1, hour, minute)
}

/// Builds a UTC instant on the given day of January 2024.
pub fn on(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .expect("valid test instant")
}

pub fn create_test_student(usn: &str, enrolled_at: DateTime<Utc>) -> NewStudent {
    NewStudent {
        name: String::from("A"),
        usn: usn.to_string(),
        age: String::from("20"),
        course: String::from("CS"),
        phone: String::from("555"),
        enrolled_at,
    }
}

pub fn create_test_log(usn: &str, recognized_at: DateTime<Utc>) -> NewAttendanceLog {
    NewAttendanceLog {
        usn: usn.to_string(),
        name: String::from("A"),
        course: String::from("CS"),
        recognized_at,
        attendance_day: recognized_at.date_naive(),
    }
}

pub fn create_test_periodwise_log(
    usn: &str,
    period: Period,
    recognized_at: DateTime<Utc>,
) -> NewPeriodwiseAttendanceLog {
    NewPeriodwiseAttendanceLog {
        usn: usn.to_string(),
        name: String::from("A"),
        course: String::from("CS"),
        period,
        recognized_at,
        attendance_day: recognized_at.date_naive(),
    }
}
