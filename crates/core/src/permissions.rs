//! Authorization predicates evaluated before any data is written.

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Message used for every authorization refusal.
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// Only the author of a resource may modify or delete it.
pub fn ensure_owner(owner_id: DbId, user_id: DbId) -> Result<(), CoreError> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(PERMISSION_DENIED.into()))
    }
}

/// The caller's role must be one of `allowed`.
pub fn ensure_role(actual: Role, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(PERMISSION_DENIED.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn owner_passes() {
        assert!(ensure_owner(4, 4).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        assert_matches!(ensure_owner(4, 5), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn role_membership() {
        assert!(ensure_role(Role::Librarian, &[Role::Admin, Role::Librarian]).is_ok());
        assert_matches!(
            ensure_role(Role::Member, &[Role::Admin, Role::Librarian]),
            Err(CoreError::Forbidden(_))
        );
    }
}
