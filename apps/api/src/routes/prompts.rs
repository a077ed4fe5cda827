use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::client::{filter_by_search, Notice, SubmissionState, SubmitOutcome, TimeFilter};
use crate::errors::AppError;
use crate::interpreter::layout::LAYOUT_RULES_VERSION;
use crate::interpreter::platform::PLATFORM_RULES_VERSION;
use crate::interpreter::{interpret, Interpretation, TokenMatching};
use crate::models::prompt::PromptRecord;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub text: String,
    /// Window to refresh after a successful insert; the displayed window when absent.
    #[serde(default)]
    pub timeframe: Option<TimeFilter>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub prompt: PromptRecord,
    pub message: &'static str,
    pub refreshed: bool,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub timeframe: TimeFilter,
    #[serde(default)]
    pub search: String,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub timeframe: TimeFilter,
    pub total: usize,
    pub prompts: Vec<PromptRecord>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

#[derive(Serialize)]
pub struct DisplayedResponse {
    pub timeframe: TimeFilter,
    pub state: SubmissionState,
    pub notice: Option<&'static str>,
    pub prompts: Vec<PromptRecord>,
}

#[derive(Deserialize)]
pub struct InterpretRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct InterpretResponse {
    #[serde(flatten)]
    pub interpretation: Interpretation,
    pub token_matching: TokenMatching,
    pub platform_rules_version: u32,
    pub layout_rules_version: u32,
}

/// POST /api/v1/prompts
pub async fn handle_submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;
    let timeframe = req.timeframe.unwrap_or_else(|| state.prompts.timeframe());
    match state.prompts.submit(&req.text, timeframe).await? {
        SubmitOutcome::Ignored => Ok(StatusCode::NO_CONTENT.into_response()),
        SubmitOutcome::Stored { record, refreshed } => Ok((
            StatusCode::CREATED,
            Json(SubmitResponse {
                prompt: record,
                message: Notice::Saved.message(),
                refreshed,
            }),
        )
            .into_response()),
    }
}

/// GET /api/v1/prompts?timeframe=&search=
/// Fetches the window from the store, then narrows it in memory.
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let records = state.prompts.fetch_window(params.timeframe).await?;
    let total = records.len();
    Ok(Json(ListResponse {
        timeframe: params.timeframe,
        total,
        prompts: filter_by_search(&records, &params.search),
    }))
}

/// GET /api/v1/prompts/displayed?search=
/// Searches the last fetched list without touching the store.
pub async fn handle_displayed(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<DisplayedResponse> {
    let client = &state.prompts;
    Json(DisplayedResponse {
        timeframe: client.timeframe(),
        state: client.state(),
        notice: client.notice().map(|n| n.message()),
        prompts: client.search(&params.search),
    })
}

/// POST /api/v1/interpret
/// Dry run of the interpreter; nothing is stored.
pub async fn handle_interpret(
    State(state): State<AppState>,
    payload: Result<Json<InterpretRequest>, JsonRejection>,
) -> Result<Json<InterpretResponse>, AppError> {
    let Json(req) = payload?;
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let matching = state.prompts.matching();
    Ok(Json(InterpretResponse {
        interpretation: interpret(&req.text, state.prompts.today(), matching),
        token_matching: matching,
        platform_rules_version: PLATFORM_RULES_VERSION,
        layout_rules_version: LAYOUT_RULES_VERSION,
    }))
}
