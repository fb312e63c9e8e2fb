//! Profile roles for the library area.
//!
//! The string forms must match the `ck_user_profiles_role` constraint in
//! `20260101000002_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_LIBRARIAN: &str = "Librarian";
pub const ROLE_MEMBER: &str = "Member";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Librarian,
    #[default]
    Member,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Librarian, Role::Member];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Librarian => ROLE_LIBRARIAN,
            Role::Member => ROLE_MEMBER,
        }
    }

    /// Roles that manage library holdings.
    pub const STAFF: [Role; 2] = [Role::Admin, Role::Librarian];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                CoreError::field("role", format!("\"{s}\" is not a valid choice."))
            })
    }
}
