// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! All state-changing operations for the persistence layer. Records are
//! append-only: nothing here updates or deletes.
//!
//! ## Module Organization
//!
//! - `students` - Enrollment inserts
//! - `attendance` - Daily and period-wise attendance inserts
//! - `admins` - Admin creation (password hashing included)
//!
//! Store-assigned identifiers come from `get_last_insert_rowid()` in the
//! `backend` module.

pub mod admins;
pub mod attendance;
pub mod students;

pub use admins::{PASSWORD_HASH_COST, create_admin};
pub use attendance::{insert_attendance_log, insert_periodwise_attendance_log};
pub use students::insert_student;
