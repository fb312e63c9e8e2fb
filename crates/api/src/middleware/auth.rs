//! Token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use shelfmark_core::error::CoreError;
use shelfmark_core::roles::Role;
use shelfmark_core::tokens::{hash_token, parse_authorization};
use shelfmark_core::types::DbId;
use shelfmark_db::repositories::TokenRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Rejection for requests without an `Authorization` header.
pub const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";

/// Rejection for malformed or unknown token keys.
pub const INVALID_TOKEN: &str = "Invalid token.";

/// Authenticated user resolved from an `Authorization: Token <key>` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Both a missing and an unknown token reject with 403.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    /// `None` when the user has no profile row.
    pub role: Option<Role>,
}

impl AuthUser {
    /// The caller's role, or 403 if the user has no profile.
    pub fn require_role(&self) -> AppResult<Role> {
        self.role.ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                shelfmark_core::permissions::PERMISSION_DENIED.into(),
            ))
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::Forbidden(MISSING_CREDENTIALS.into())))?;

        let key = parse_authorization(auth_header)
            .ok_or_else(|| AppError::Core(CoreError::Forbidden(INVALID_TOKEN.into())))?;

        let identity = TokenRepo::find_identity(&state.pool, &hash_token(key))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden(INVALID_TOKEN.into())))?;

        Ok(AuthUser {
            user_id: identity.user_id,
            username: identity.username,
            role: identity.role.and_then(|r| r.parse().ok()),
        })
    }
}
