// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::admins;
use crate::error::PersistenceError;

/// bcrypt work factor for admin passwords.
pub const PASSWORD_HASH_COST: u32 = 10;

/// Creates a new admin.
///
/// Only the bcrypt hash of `password` is stored.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The display name
/// * `email` - The login email
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email already exists,
/// or another error if hashing or the insert fails.
pub fn create_admin(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating admin with email: {}", email);

    let password_hash: String = bcrypt::hash(password, PASSWORD_HASH_COST)?;

    diesel::insert_into(admins::table)
        .values((
            admins::username.eq(username),
            admins::email.eq(email),
            admins::password_hash.eq(&password_hash),
        ))
        .execute(conn)?;

    let admin_id: i64 = get_last_insert_rowid(conn)?;

    info!(admin_id, "Admin created successfully");

    Ok(admin_id)
}
