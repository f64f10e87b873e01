// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! `Display` on [`ApiError`] yields the message shown to clients, except for
//! [`ApiError::Internal`], whose detail is for logs only.

use attendance_domain::DomainError;
use attendance_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No admin is registered under the email.
    UnknownAdmin,
    /// The password did not match the stored hash.
    InvalidPassword,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAdmin => write!(f, "Admin not found"),
            Self::InvalidPassword => write!(f, "Invalid password"),
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field (or fields) that were invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request would duplicate an existing record.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Conflict { message } => write!(f, "{message}"),
            Self::AuthenticationFailed { reason } => write!(f, "{reason}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownAdmin => Self::ResourceNotFound {
                resource_type: String::from("Admin"),
                message: err.to_string(),
            },
            AuthError::InvalidPassword => Self::AuthenticationFailed {
                reason: err.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingUsn => ApiError::InvalidInput {
            field: String::from("usn"),
            message: err.to_string(),
        },
        DomainError::MissingEnrollmentFields { ref fields } => ApiError::InvalidInput {
            field: fields.join(","),
            message: err.to_string(),
        },
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("All fields are required"),
        },
        DomainError::NoClassPeriod => ApiError::InvalidInput {
            field: String::from("recognizedAt"),
            message: err.to_string(),
        },
        DomainError::InvalidTimestamp(_) => ApiError::InvalidInput {
            field: String::from("recognizedAt"),
            message: String::from("Invalid recognizedAt timestamp"),
        },
        DomainError::UnknownPeriod(_) => ApiError::InvalidInput {
            field: String::from("period"),
            message: err.to_string(),
        },
        DomainError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Unique violations are reported by the caller, which knows which record
/// was duplicated; everything reaching this function is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    ApiError::Internal {
        message: err.to_string(),
    }
}
