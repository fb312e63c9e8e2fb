//! Handlers for `/admin` user management.

use axum::extract::{Path, State};
use axum::Json;
use shelfmark_core::error::CoreError;
use shelfmark_core::roles::Role;
use shelfmark_core::types::DbId;
use shelfmark_db::models::profile::{UpdateRole, UserProfile};
use shelfmark_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// PUT /api/admin/users/{id}/role
///
/// Unknown role names are a field error on `role`.
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<UserProfile>> {
    let role: Role = input.role.parse()?;

    let profile = ProfileRepo::set_role(&state.pool, id, role.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role = %role, admin_id = admin.user_id, "User role changed");
    Ok(Json(profile))
}
