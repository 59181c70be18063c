//! Conversational HTTP endpoints.
//!
//! | route | response |
//! |---|---|
//! | `POST /chat` | `{response, source}` |
//! | `GET /get_history` | `[{speaker, text, timestamp}]` |
//! | `POST /new_chat` | `{status, message}` |
//! | `GET /summarize` | `{summary}` |
//! | `GET /suggest_reply` | `{suggestion}` |
//!
//! Failures are `{error, kind}` with 400 for blank or unreadable input and
//! 500 otherwise.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use arise_agent::{SourceTag, prompts};
use arise_core::Error;
use arise_core::transcript::Turn;

use crate::SharedState;

pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/get_history", get(history_handler))
        .route("/new_chat", post(new_chat_handler))
        .route("/summarize", get(summarize_handler))
        .route("/suggest_reply", get(suggest_handler))
        .with_state(state)
}

/// A pipeline error rendered as `{error, kind}`.
pub struct ApiError(pub Error);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::InvalidRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::EmptyInput | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(kind = self.0.kind(), error = %self.0, "Request failed");
        } else {
            warn!(kind = self.0.kind(), "Request rejected");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub source: SourceTag,
}

async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    info!(message_len = req.message.len(), "Chat message received");
    let mut session = state.session.lock().await;
    let answer = session.send(&req.message).await?;
    Ok(Json(ChatResponse {
        response: answer.text,
        source: answer.source,
    }))
}

async fn history_handler(State(state): State<SharedState>) -> Result<Json<Vec<Turn>>, ApiError> {
    let session = state.session.lock().await;
    Ok(Json(session.transcript().await?))
}

#[derive(Serialize)]
struct NewChatResponse {
    status: &'static str,
    message: &'static str,
}

async fn new_chat_handler(State(state): State<SharedState>) -> Result<Json<NewChatResponse>, ApiError> {
    state.session.lock().await.reset().await?;
    Ok(Json(NewChatResponse {
        status: "ok",
        message: prompts::NEW_CHAT_MESSAGE,
    }))
}

#[derive(Serialize)]
struct SummaryResponse {
    summary: String,
}

async fn summarize_handler(State(state): State<SharedState>) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state.session.lock().await.summarize().await?;
    Ok(Json(SummaryResponse { summary }))
}

#[derive(Serialize)]
struct SuggestionResponse {
    suggestion: String,
}

async fn suggest_handler(State(state): State<SharedState>) -> Result<Json<SuggestionResponse>, ApiError> {
    let suggestion = state.session.lock().await.suggest_next().await?;
    Ok(Json(SuggestionResponse { suggestion }))
}
