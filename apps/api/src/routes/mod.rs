pub mod auth;
pub mod health;
pub mod prompts;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/prompts",
            get(prompts::handle_list).post(prompts::handle_submit),
        )
        .route("/api/v1/prompts/displayed", get(prompts::handle_displayed))
        .route("/api/v1/interpret", post(prompts::handle_interpret))
        .route("/api/v1/auth/google", get(auth::handle_google_sign_in))
        .with_state(state)
}
