use axum::{extract::State, response::Redirect};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/auth/google
/// Hands the browser to the hosted auth provider's Google OAuth flow.
pub async fn handle_google_sign_in(State(state): State<AppState>) -> Result<Redirect, AppError> {
    if state.config.supabase_url.is_empty() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "SUPABASE_URL is not configured; sign-in unavailable"
        )));
    }
    Ok(Redirect::temporary(&authorize_url(&state.config.supabase_url)))
}

fn authorize_url(base_url: &str) -> String {
    format!(
        "{}/auth/v1/authorize?provider=google",
        base_url.trim_end_matches('/')
    )
}
