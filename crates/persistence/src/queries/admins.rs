// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::AdminData;
use crate::diesel_schema::admins;
use crate::error::PersistenceError;

/// Diesel Queryable struct for admin rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = admins)]
struct AdminRow {
    admin_id: i64,
    username: String,
    email: String,
    password_hash: String,
}

/// Retrieves an admin by email.
///
/// Emails are matched exactly.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the admin is not found.
pub fn get_admin_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<AdminData>, PersistenceError> {
    debug!("Looking up admin by email: {}", email);

    let result: Result<AdminRow, diesel::result::Error> = admins::table
        .filter(admins::email.eq(email))
        .select(AdminRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(AdminData {
            admin_id: row.admin_id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the stored hash is not a valid bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    Ok(bcrypt::verify(password, password_hash)?)
}
