// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::NewStudent;
use chrono::{DateTime, Utc};

/// Raw enrollment fields as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentFields<'a> {
    pub name: Option<&'a str>,
    pub usn: Option<&'a str>,
    pub age: Option<&'a str>,
    pub course: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Returns the trimmed value if it is present and not blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Validates a student identifier.
///
/// # Errors
///
/// Returns `DomainError::MissingUsn` if the identifier is absent or blank.
pub fn require_usn(usn: Option<&str>) -> Result<String, DomainError> {
    present(usn)
        .map(str::to_string)
        .ok_or(DomainError::MissingUsn)
}

/// Validates a single required text field.
///
/// The value is trimmed. Use [`require_secret`] for values where whitespace
/// is significant.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is absent or blank.
pub fn require_field(field: &'static str, value: Option<&str>) -> Result<String, DomainError> {
    present(value)
        .map(str::to_string)
        .ok_or(DomainError::MissingField { field })
}

/// Validates a secret. The value is kept exactly as supplied.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is absent or empty.
pub fn require_secret(field: &'static str, value: Option<&str>) -> Result<String, DomainError> {
    value
        .filter(|secret| !secret.is_empty())
        .map(str::to_string)
        .ok_or(DomainError::MissingField { field })
}

/// Validates an enrollment request and stamps it with its creation time.
///
/// All five fields are mandatory. No uniqueness check is made on `usn`.
///
/// # Errors
///
/// Returns `DomainError::MissingEnrollmentFields` listing every field that
/// is absent or blank.
pub fn validate_enrollment(
    fields: EnrollmentFields<'_>,
    enrolled_at: DateTime<Utc>,
) -> Result<NewStudent, DomainError> {
    let checked: [(&'static str, Option<&str>); 5] = [
        ("name", present(fields.name)),
        ("usn", present(fields.usn)),
        ("age", present(fields.age)),
        ("course", present(fields.course)),
        ("phone", present(fields.phone)),
    ];

    let missing: Vec<&'static str> = checked
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::MissingEnrollmentFields { fields: missing });
    }

    let [name, usn, age, course, phone] = checked.map(|(_, value)| value.unwrap_or_default());

    Ok(NewStudent {
        name: name.to_string(),
        usn: usn.to_string(),
        age: age.to_string(),
        course: course.to_string(),
        phone: phone.to_string(),
        enrolled_at,
    })
}

/// Returns manually supplied `(name, course)` when both are present.
///
/// Daily attendance accepts these in place of a student record.
#[must_use]
pub fn manual_identity(name: Option<&str>, course: Option<&str>) -> Option<(String, String)> {
    match (present(name), present(course)) {
        (Some(name), Some(course)) => Some((name.to_string(), course.to_string())),
        _ => None,
    }
}
