//! Handlers for the `/accounts` resource: registration, token login and
//! logout, profiles and the follow graph.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shelfmark_core::error::CoreError;
use shelfmark_core::tokens::generate_token;
use shelfmark_core::types::DbId;
use shelfmark_core::validation::accounts::validate_new_password;
use shelfmark_core::validation::FieldErrors;
use shelfmark_db::models::user::{
    CreateUser, ReplaceProfile, UpdateProfile, UserProfileView, UserSummary,
};
use shelfmark_db::repositories::{FollowRepo, TokenRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password, verify_unknown_account};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Returned for any failed login, whether the username or the password is wrong.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /accounts/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(
            min = 1,
            max = 150,
            message = "Ensure this field has no more than 150 characters."
        ),
        custom(function = "shelfmark_core::validation::accounts::check_username")
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Ensure this field has no more than 500 characters."))]
    pub bio: String,
    pub profile_picture: Option<String>,
}

/// Request body for `POST /accounts/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by register and login. `token` is the only copy of the key.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserSummary,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a user's profile view or 404.
async fn ensure_profile(pool: &sqlx::PgPool, id: DbId) -> AppResult<UserProfileView> {
    UserRepo::find_profile_view(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Verify a follow target exists and is not the caller, returning its username.
async fn ensure_follow_target(pool: &sqlx::PgPool, caller: DbId, target: DbId) -> AppResult<String> {
    if caller == target {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot follow or unfollow yourself.".into(),
        )));
    }
    let user = UserRepo::find_by_id(pool, target)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: target,
        }))?;
    Ok(user.username)
}

// ---------------------------------------------------------------------------
// Registration and tokens
// ---------------------------------------------------------------------------

/// POST /api/accounts/register
///
/// Creates the user, its `Member` profile and a first token in one
/// transaction.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let mut errors = input
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default();
    errors.merge(validate_new_password(
        &input.password,
        &input.password_confirm,
        state.config.min_password_length,
    ));
    errors.into_result()?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with that username already exists.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)?;
    let token = generate_token();
    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        bio: input.bio,
        profile_picture: input.profile_picture,
    };
    let user = UserRepo::register(&state.pool, &create, &token.hash).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserSummary::from(&user),
            token: token.key,
            message: "User registered successfully".into(),
        }),
    ))
}

/// POST /api/accounts/login
///
/// Issues a new token key on every successful login, replacing the old one.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = match UserRepo::find_by_username(&state.pool, &input.username).await? {
        Some(user) if verify_password(&input.password, &user.password_hash) => Some(user),
        Some(_) => None,
        None => {
            verify_unknown_account(&input.password);
            None
        }
    }
    .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let token = generate_token();
    TokenRepo::issue(&state.pool, user.id, &token.hash).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: UserSummary::from(&user),
        token: token.key,
        message: "Login successful".into(),
    }))
}

/// POST /api/accounts/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    TokenRepo::revoke(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// GET /api/accounts/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserProfileView>> {
    Ok(Json(ensure_profile(&state.pool, auth.user_id).await?))
}

/// PUT /api/accounts/profile
pub async fn replace_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ReplaceProfile>,
) -> AppResult<Json<UserProfileView>> {
    input.validate()?;
    apply_profile_update(&state, auth.user_id, &input.into()).await
}

/// PATCH /api/accounts/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserProfileView>> {
    input.validate()?;
    apply_profile_update(&state, auth.user_id, &input).await
}

async fn apply_profile_update(
    state: &AppState,
    user_id: DbId,
    input: &UpdateProfile,
) -> AppResult<Json<UserProfileView>> {
    UserRepo::update_profile(&state.pool, user_id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    tracing::info!(user_id, "Profile updated");
    Ok(Json(ensure_profile(&state.pool, user_id).await?))
}

/// GET /api/accounts/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserProfileView>> {
    Ok(Json(ensure_profile(&state.pool, id).await?))
}

// ---------------------------------------------------------------------------
// Follow graph
// ---------------------------------------------------------------------------

/// GET /api/accounts/users/{id}/followers
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<UserSummary>>> {
    ensure_profile(&state.pool, id).await?;
    Ok(Json(FollowRepo::followers(&state.pool, id).await?))
}

/// GET /api/accounts/users/{id}/following
pub async fn following(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<UserSummary>>> {
    ensure_profile(&state.pool, id).await?;
    Ok(Json(FollowRepo::following(&state.pool, id).await?))
}

/// POST /api/accounts/follow/{user_id}
///
/// Following someone already followed succeeds without change.
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let username = ensure_follow_target(&state.pool, auth.user_id, user_id).await?;
    let created = FollowRepo::follow(&state.pool, auth.user_id, user_id).await?;
    if created {
        tracing::info!(follower_id = auth.user_id, followed_id = user_id, "User followed");
    }
    Ok(Json(MessageResponse {
        message: format!("You are now following {username}."),
    }))
}

/// POST /api/accounts/unfollow/{user_id}
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let username = ensure_follow_target(&state.pool, auth.user_id, user_id).await?;
    let removed = FollowRepo::unfollow(&state.pool, auth.user_id, user_id).await?;
    if removed {
        tracing::info!(follower_id = auth.user_id, followed_id = user_id, "User unfollowed");
    }
    Ok(Json(MessageResponse {
        message: format!("You have unfollowed {username}."),
    }))
}
