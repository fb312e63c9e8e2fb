//! Role-gated landing views for the library area.

use axum::Json;
use serde::Serialize;
use shelfmark_core::roles::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireLibrarian, RequireMember};

#[derive(Debug, Serialize)]
pub struct RoleView {
    pub message: String,
    pub username: String,
    pub role: Role,
}

fn view(user: AuthUser, role: Role) -> Json<RoleView> {
    Json(RoleView {
        message: format!("Welcome to the {} dashboard, {}.", role.as_str().to_lowercase(), user.username),
        username: user.username,
        role,
    })
}

/// GET /api/roles/admin
pub async fn admin_view(RequireAdmin(user): RequireAdmin) -> Json<RoleView> {
    view(user, Role::Admin)
}

/// GET /api/roles/librarian
pub async fn librarian_view(RequireLibrarian(user): RequireLibrarian) -> Json<RoleView> {
    view(user, Role::Librarian)
}

/// GET /api/roles/member
pub async fn member_view(RequireMember(user): RequireMember) -> Json<RoleView> {
    view(user, Role::Member)
}
