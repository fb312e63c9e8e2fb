//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose profile role
//! is not among the allowed ones. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shelfmark_core::permissions::ensure_role;
use shelfmark_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then require one of `allowed`. Users without a profile are
/// always rejected.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[Role],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    ensure_role(user.require_role()?, allowed)?;
    Ok(user)
}

/// Requires the `Admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[Role::Admin]).await.map(RequireAdmin)
    }
}

/// Requires the `Librarian` role.
pub struct RequireLibrarian(pub AuthUser);

impl FromRequestParts<AppState> for RequireLibrarian {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[Role::Librarian])
            .await
            .map(RequireLibrarian)
    }
}

/// Requires the `Member` role.
pub struct RequireMember(pub AuthUser);

impl FromRequestParts<AppState> for RequireMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[Role::Member]).await.map(RequireMember)
    }
}

/// Requires `Admin` or `Librarian`: the roles that manage library holdings.
///
/// ```ignore
/// async fn manage(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &Role::STAFF)
            .await
            .map(RequireStaff)
    }
}
