// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin authentication.
//!
//! Signin is a credential check only: no session or token is issued.

use attendance_domain::AdminIdentity;
use attendance_persistence::{AdminData, PersistenceError};
use tracing::{debug, warn};

use crate::error::{ApiError, AuthError, translate_persistence_error};
use crate::store::AttendanceStore;

/// Authentication service for admin credentials.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Registers an admin.
    ///
    /// # Arguments
    ///
    /// * `store` - The attendance store
    /// * `username` - The display name
    /// * `email` - The login email
    /// * `password` - The plain-text password (will be hashed)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` if the email is already registered, or
    /// `ApiError::Internal` if storage fails.
    pub fn register(
        store: &mut impl AttendanceStore,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, ApiError> {
        let existing: Option<AdminData> = store
            .get_admin_by_email(email)
            .map_err(translate_persistence_error)?;
        if existing.is_some() {
            warn!("Signup rejected: email {} already registered", email);
            return Err(email_taken());
        }

        store
            .create_admin(username, email, password)
            .map_err(|e| match e {
                PersistenceError::UniqueViolation(_) => email_taken(),
                other => translate_persistence_error(other),
            })
    }

    /// Checks an email and password against the stored admin.
    ///
    /// # Arguments
    ///
    /// * `store` - The attendance store
    /// * `email` - The login email
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// The admin's identity, without the password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No admin has this email
    /// - The password does not match
    /// - Storage fails
    pub fn authenticate(
        store: &mut impl AttendanceStore,
        email: &str,
        password: &str,
    ) -> Result<AdminIdentity, ApiError> {
        debug!("Authenticating admin {}", email);

        let admin: AdminData = store
            .get_admin_by_email(email)
            .map_err(translate_persistence_error)?
            .ok_or(AuthError::UnknownAdmin)?;

        let matches: bool = store
            .verify_password(password, &admin.password_hash)
            .map_err(translate_persistence_error)?;
        if !matches {
            warn!(admin_id = admin.admin_id, "Signin rejected: invalid password");
            return Err(AuthError::InvalidPassword.into());
        }

        Ok(AdminIdentity {
            username: admin.username,
            email: admin.email,
        })
    }
}

fn email_taken() -> ApiError {
    ApiError::Conflict {
        message: String::from("Email already registered"),
    }
}
