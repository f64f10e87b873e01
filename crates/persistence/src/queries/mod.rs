// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `students` - Enrollment lookups and listings
//! - `attendance` - Daily and period-wise attendance lookups
//! - `admins` - Admin lookups and password verification

pub mod admins;
pub mod attendance;
pub mod students;

pub use admins::{get_admin_by_email, verify_password};
pub use attendance::{
    find_attendance_in_day, find_periodwise_attendance_in_day, list_attendance_logs,
    list_periodwise_attendance_logs,
};
pub use students::{find_student_by_usn, list_students};
