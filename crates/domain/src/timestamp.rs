// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical timestamp text.
//!
//! Instants are written as RFC 3339 UTC with millisecond precision
//! (`2024-01-01T09:05:00.000Z`). The format is fixed width, so text order
//! is chronological order and range filters work directly on stored text.

use crate::error::DomainError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Formats an instant in the canonical text form.
#[must_use]
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses canonical (or any RFC 3339) text back into a UTC instant.
///
/// # Errors
///
/// Returns an error if the text is not RFC 3339.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidTimestamp(text.to_string()))
}

/// Serde adapter writing an instant in the canonical text form.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize_timestamp<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(instant))
}

/// Serde adapter writing a store identifier as a string, the way document
/// stores expose `_id`.
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_record_id<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}
