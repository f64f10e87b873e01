// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the classroom attendance backend.
//!
//! Request and response DTOs, the handler for each operation, and the
//! explicit translation of domain and persistence errors into [`ApiError`].
//! Nothing here knows about HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

pub use auth::AuthenticationService;
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    enroll_student, list_attendance, list_period_attendance, list_students, log_daily_attendance,
    log_period_attendance, signin, signup,
};
pub use request_response::{
    EnrollStudentRequest, LogAttendanceRequest, LogPeriodAttendanceRequest,
    LogPeriodAttendanceResponse, MessageResponse, SigninRequest, SigninResponse, SignupRequest,
    deserialize_loose_text,
};
pub use store::AttendanceStore;
