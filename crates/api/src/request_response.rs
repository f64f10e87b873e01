// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Request fields are all optional at this level; presence is checked by the
//! handlers so that a missing field produces the contract's message rather
//! than a deserialization error. Text fields accept JSON strings or numbers.

use attendance_domain::{AdminIdentity, PeriodwiseAttendanceLog, TimestampInput};
use serde::{Deserialize, Deserializer, Serialize};

/// A text field as sent by clients: a string, or a number to be stored as
/// its decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Number(serde_json::Number),
}

/// Deserializes an optional text field that may arrive as a JSON number.
///
/// # Errors
///
/// Fails if the value is neither a string, a number nor null.
pub fn deserialize_loose_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value: Option<LooseText> = Option::deserialize(deserializer)?;
    Ok(value.map(|loose| match loose {
        LooseText::Text(text) => text,
        LooseText::Number(number) => number.to_string(),
    }))
}

/// API request to enroll a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnrollStudentRequest {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub usn: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub course: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub phone: Option<String>,
}

/// API request to log daily attendance.
///
/// `name` and `course` are only used when no student is enrolled under `usn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAttendanceRequest {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub usn: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub course: Option<String>,
    /// When the student was recognized. Defaults to the time of the request.
    #[serde(default)]
    pub recognized_at: Option<TimestampInput>,
}

/// API request to log period-wise attendance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPeriodAttendanceRequest {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub usn: Option<String>,
    /// When the student was recognized. Defaults to the time of the request.
    #[serde(default)]
    pub recognized_at: Option<TimestampInput>,
}

/// API request to register an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub password: Option<String>,
}

/// API request to sign in as an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub password: Option<String>,
}

/// A response carrying only a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    /// A success message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// API response for a recorded period-wise attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogPeriodAttendanceResponse {
    /// A success message naming the period.
    pub message: String,
    /// The stored log.
    pub log: PeriodwiseAttendanceLog,
}

/// API response for a successful signin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigninResponse {
    /// A success message.
    pub message: String,
    /// The signed-in admin, without credentials.
    pub admin: AdminIdentity,
}
