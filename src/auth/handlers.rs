use axum::{
    extract::{FromRef, State},
    routing::post,
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest},
        jwt::JwtKeys,
        password::verify_password,
    },
    error::ApiError,
    extract::Json,
    state::AppState,
    users::dto::PublicUser,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /login — exchange credentials for a bearer token.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = match state.users.find_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !ok {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let token = JwtKeys::from_ref(&state)
        .sign(user.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(user_id = %user.id, "login succeeded");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}
