// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler validates its request, consults the store and returns either
//! a response DTO or an [`ApiError`]. The current instant and the calendar
//! are passed in so that handlers never read the clock themselves.

use attendance_domain::{
    AttendanceCalendar, AttendanceLog, DayBounds, DomainError, EnrollmentFields, NewAttendanceLog,
    NewPeriodwiseAttendanceLog, NewStudent, Period, PeriodwiseAttendanceLog, Student,
    manual_identity, require_field, require_secret, require_usn, validate_enrollment,
};
use attendance_persistence::PersistenceError;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::auth::AuthenticationService;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    EnrollStudentRequest, LogAttendanceRequest, LogPeriodAttendanceRequest,
    LogPeriodAttendanceResponse, MessageResponse, SigninRequest, SigninResponse, SignupRequest,
};
use crate::store::AttendanceStore;

/// Logs a rejected request and passes the error through.
fn rejected(operation: &str, err: ApiError) -> ApiError {
    warn!("{} rejected: {}", operation, err);
    err
}

/// Enrolls a student.
///
/// # Arguments
///
/// * `store` - The attendance store
/// * `request` - The enrollment request
/// * `now` - The enrollment time
///
/// # Errors
///
/// Returns an error if:
/// - Any of the five fields is missing or blank
/// - Storage fails
pub fn enroll_student(
    store: &mut impl AttendanceStore,
    request: &EnrollStudentRequest,
    now: DateTime<Utc>,
) -> Result<MessageResponse, ApiError> {
    let fields: EnrollmentFields<'_> = EnrollmentFields {
        name: request.name.as_deref(),
        usn: request.usn.as_deref(),
        age: request.age.as_deref(),
        course: request.course.as_deref(),
        phone: request.phone.as_deref(),
    };
    let student: NewStudent = validate_enrollment(fields, now)
        .map_err(|e| rejected("enroll_student", translate_domain_error(e)))?;

    let stored: Student = store
        .insert_student(student)
        .map_err(translate_persistence_error)?;

    info!(student_id = stored.id, usn = %stored.usn, "Student saved");

    Ok(MessageResponse::new("Student saved to database!"))
}

/// Lists every student, most recent enrollment first.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn list_students(store: &mut impl AttendanceStore) -> Result<Vec<Student>, ApiError> {
    store.list_students().map_err(translate_persistence_error)
}

/// Records a student's attendance for the day.
///
/// When no student is enrolled under `usn`, the request's `name` and
/// `course` are used instead; both must then be present.
///
/// # Errors
///
/// Returns an error if:
/// - `usn` is missing or blank
/// - No student exists and manual `name`/`course` are incomplete
/// - `recognizedAt` cannot be interpreted
/// - The student already has a log for that local day
/// - Storage fails
pub fn log_daily_attendance(
    store: &mut impl AttendanceStore,
    calendar: &AttendanceCalendar,
    request: &LogAttendanceRequest,
    now: DateTime<Utc>,
) -> Result<MessageResponse, ApiError> {
    const OPERATION: &str = "log_daily_attendance";

    let usn: String = require_usn(request.usn.as_deref())
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;

    let student: Option<Student> = store
        .find_student_by_usn(&usn)
        .map_err(translate_persistence_error)?;

    let (name, course): (String, String) = match student {
        Some(student) => (student.name, student.course),
        None => manual_identity(request.name.as_deref(), request.course.as_deref()).ok_or_else(
            || {
                rejected(
                    OPERATION,
                    ApiError::ResourceNotFound {
                        resource_type: String::from("Student"),
                        message: String::from(
                            "Student not found, insufficient manual data provided",
                        ),
                    },
                )
            },
        )?,
    };

    let recognized_at: DateTime<Utc> = calendar
        .resolve_instant(request.recognized_at.as_ref(), now)
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;
    let day: DayBounds = calendar.day_bounds(&recognized_at);

    let existing: Option<AttendanceLog> = store
        .find_attendance_in_day(&usn, &day)
        .map_err(translate_persistence_error)?;
    if existing.is_some() {
        return Err(rejected(OPERATION, daily_duplicate()));
    }

    let log: NewAttendanceLog = NewAttendanceLog {
        usn,
        name,
        course,
        recognized_at,
        attendance_day: day.day,
    };
    let stored: AttendanceLog = store.insert_attendance_log(log).map_err(|e| match e {
        PersistenceError::UniqueViolation(_) => rejected(OPERATION, daily_duplicate()),
        other => translate_persistence_error(other),
    })?;

    info!(log_id = stored.id, usn = %stored.usn, day = %day.day, "Attendance recorded");

    Ok(MessageResponse::new("Attendance logged successfully"))
}

/// Lists every daily attendance log, most recent first.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn list_attendance(store: &mut impl AttendanceStore) -> Result<Vec<AttendanceLog>, ApiError> {
    store
        .list_attendance_logs()
        .map_err(translate_persistence_error)
}

/// Records a student's attendance for the class period in progress.
///
/// Unlike daily attendance, the student must be enrolled.
///
/// # Errors
///
/// Returns an error if:
/// - `usn` is missing or blank
/// - No student is enrolled under `usn`
/// - `recognizedAt` cannot be interpreted
/// - The instant falls outside every class period
/// - The student already has a log for that period on that local day
/// - Storage fails
pub fn log_period_attendance(
    store: &mut impl AttendanceStore,
    calendar: &AttendanceCalendar,
    request: &LogPeriodAttendanceRequest,
    now: DateTime<Utc>,
) -> Result<LogPeriodAttendanceResponse, ApiError> {
    const OPERATION: &str = "log_period_attendance";

    let usn: String = require_usn(request.usn.as_deref())
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;

    let student: Student = store
        .find_student_by_usn(&usn)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            rejected(
                OPERATION,
                ApiError::ResourceNotFound {
                    resource_type: String::from("Student"),
                    message: String::from("Student not found"),
                },
            )
        })?;

    let recognized_at: DateTime<Utc> = calendar
        .resolve_instant(request.recognized_at.as_ref(), now)
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;

    let period: Period = calendar.resolve_period(&recognized_at);
    if !period.is_class() {
        return Err(rejected(
            OPERATION,
            translate_domain_error(DomainError::NoClassPeriod),
        ));
    }

    let day: DayBounds = calendar.day_bounds(&recognized_at);
    let existing: Option<PeriodwiseAttendanceLog> = store
        .find_periodwise_attendance_in_day(&usn, period, &day)
        .map_err(translate_persistence_error)?;
    if existing.is_some() {
        return Err(rejected(OPERATION, period_duplicate(period)));
    }

    let log: NewPeriodwiseAttendanceLog = NewPeriodwiseAttendanceLog {
        usn,
        name: student.name,
        course: student.course,
        period,
        recognized_at,
        attendance_day: day.day,
    };
    let stored: PeriodwiseAttendanceLog = store
        .insert_periodwise_attendance_log(log)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => rejected(OPERATION, period_duplicate(period)),
            other => translate_persistence_error(other),
        })?;

    info!(
        log_id = stored.id,
        usn = %stored.usn,
        period = %period,
        "Period-wise attendance recorded"
    );

    Ok(LogPeriodAttendanceResponse {
        message: format!("Period-wise attendance recorded for {period}"),
        log: stored,
    })
}

/// Lists every period-wise attendance log, most recent first.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn list_period_attendance(
    store: &mut impl AttendanceStore,
) -> Result<Vec<PeriodwiseAttendanceLog>, ApiError> {
    store
        .list_periodwise_attendance_logs()
        .map_err(translate_persistence_error)
}

/// Registers an admin.
///
/// # Errors
///
/// Returns an error if:
/// - `username`, `email` or `password` is missing or blank
/// - The email is already registered
/// - Hashing or storage fails
pub fn signup(
    store: &mut impl AttendanceStore,
    request: &SignupRequest,
) -> Result<MessageResponse, ApiError> {
    const OPERATION: &str = "signup";

    let username: String = require_field("username", request.username.as_deref())
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;
    let email: String = require_field("email", request.email.as_deref())
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;
    let password: String = require_secret("password", request.password.as_deref())
        .map_err(|e| rejected(OPERATION, translate_domain_error(e)))?;

    let admin_id: i64 = AuthenticationService::register(store, &username, &email, &password)?;

    info!(admin_id, "Admin signed up");

    Ok(MessageResponse::new("Admin created successfully"))
}

/// Checks admin credentials.
///
/// A missing email is treated as an unknown admin and a missing password as
/// a wrong one.
///
/// # Errors
///
/// Returns an error if:
/// - No admin has this email
/// - The password does not match
/// - Storage fails
pub fn signin(
    store: &mut impl AttendanceStore,
    request: &SigninRequest,
) -> Result<SigninResponse, ApiError> {
    let email: &str = request.email.as_deref().map_or("", str::trim);
    let password: &str = request.password.as_deref().unwrap_or_default();

    let admin = AuthenticationService::authenticate(store, email, password)?;

    info!(email = %admin.email, "Admin signed in");

    Ok(SigninResponse {
        message: String::from("Signin successful"),
        admin,
    })
}

fn daily_duplicate() -> ApiError {
    ApiError::Conflict {
        message: String::from("Attendance already recorded for today"),
    }
}

fn period_duplicate(period: Period) -> ApiError {
    ApiError::Conflict {
        message: format!("Attendance already recorded for {period} today"),
    }
}
