use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod model;
pub mod store;
pub mod validate;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
