// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A stored admin account, including its password hash.
///
/// Never serialized; callers convert to `AdminIdentity` before anything
/// leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminData {
    pub admin_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
