use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, password::hash_password},
    error::ApiError,
    extract::{Json, Path},
    state::AppState,
    users::{
        dto::{PublicUser, RegisterRequest, StatusMessage, UpdateUserRequest},
        model::{User, ROLE_ADMIN},
        store::NewUser,
        validate::{describe, validate_registration},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(delete_user))
}

/// POST /register — create an account from a validated payload.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StatusMessage>), ApiError> {
    let violations = validate_registration(&payload);
    if !violations.is_empty() {
        let text = describe(&violations);
        warn!(violations = %text, "registration payload rejected");
        return Err(ApiError::Validation(text));
    }

    // Pre-check; the UNIQUE constraint still catches the race with the insert.
    if state.users.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let password_hash =
        hash_password(&payload.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let user = state
        .users
        .create(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(StatusMessage {
            status: "User registered!",
        }),
    ))
}

/// GET /users — every account in its public shape.
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.users.list_all().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// PUT /users/:id — a user may edit only their own profile.
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if caller_id != id {
        warn!(caller = %caller_id, target = %id, "cross-account edit rejected");
        return Err(ApiError::Forbidden(
            "Editing is available only to yourself!".into(),
        ));
    }

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    apply_profile_fields(&mut user, &payload);
    if let Some(password) = non_empty(payload.password.as_deref()) {
        user.password_hash =
            hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    let updated = state.users.update(&user).await?;
    info!(user_id = %updated.id, "user updated");
    Ok(Json(PublicUser::from(updated)))
}

/// DELETE /users/:id — admin-only; a bare 204 on success.
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = state
        .users
        .find_by_id(caller_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown caller".into()))?;

    // Unknown target ids are a 404 regardless of the caller's role.
    let target = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if !caller.has_role(ROLE_ADMIN) {
        warn!(caller = %caller_id, target = %id, "delete rejected: missing admin role");
        return Err(ApiError::Forbidden("Unable to access this page!".into()));
    }

    state.users.delete(target.id).await?;
    info!(user_id = %target.id, deleted_by = %caller_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Copy the supplied, non-empty profile fields onto the record. The password
/// is handled separately by the caller because it must be re-hashed.
fn apply_profile_fields(user: &mut User, payload: &UpdateUserRequest) {
    if let Some(v) = non_empty(payload.first_name.as_deref()) {
        user.first_name = v.to_string();
    }
    if let Some(v) = non_empty(payload.last_name.as_deref()) {
        user.last_name = v.to_string();
    }
    if let Some(v) = non_empty(payload.email.as_deref()) {
        user.email = v.to_string();
    }
    if let Some(v) = non_empty(payload.phone.as_deref()) {
        user.phone = v.to_string();
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
