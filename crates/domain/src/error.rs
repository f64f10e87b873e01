// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The student identifier was absent or blank.
    #[error("USN is required")]
    MissingUsn,
    /// One or more of the five enrollment fields was absent or blank.
    #[error("All fields are required")]
    MissingEnrollmentFields {
        /// The names of the missing fields, in request order.
        fields: Vec<&'static str>,
    },
    /// A single required field was absent or blank.
    #[error("Field '{field}' is required")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The timestamp does not fall inside any scheduled class period.
    #[error("No valid class period at this time")]
    NoClassPeriod,
    /// A period label did not match the schedule.
    #[error("Unknown period: '{0}'")]
    UnknownPeriod(String),
    /// A timestamp could not be interpreted.
    #[error("Invalid recognizedAt timestamp: '{0}'")]
    InvalidTimestamp(String),
    /// A timezone name is not a known IANA zone.
    #[error("Unknown timezone: '{0}'")]
    InvalidTimezone(String),
}
