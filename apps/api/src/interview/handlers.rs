//! Axum route handlers for the interview API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{FormRejection, QueryRejection},
        Multipart, Query, State,
    },
    Form, Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::SessionQuestion;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerForm {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload
///
/// Multipart fields: `resume` (PDF bytes) and `role`. Starts a session and
/// returns its id with the first question.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SessionQuestion>, AppError> {
    let mut multipart = multipart.map_err(|e| upload_rejected(e.body_text()))?;

    let mut resume: Option<Bytes> = None;
    let mut role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_rejected(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                resume = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| upload_rejected(e.body_text()))?,
                )
            }
            "role" => {
                role = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| upload_rejected(e.body_text()))?,
                )
            }
            _ => {}
        }
    }

    let resume = resume.ok_or_else(|| upload_rejected("missing field 'resume'".into()))?;
    let role = role.ok_or_else(|| upload_rejected("missing field 'role'".into()))?;

    let started = state.interviews.upload(resume, role).await?;
    Ok(Json(started))
}

/// POST /submit-answer
///
/// Form fields: `question`, `answer`, optional `session_id`.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    form: Result<Form<SubmitAnswerForm>, FormRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Form(form) = form
        .map_err(|e| AppError::Validation(format!("Failed to save answer: {}", e.body_text())))?;

    state
        .interviews
        .submit_answer(form.session_id, form.question, form.answer)
        .await?;

    Ok(MessageResponse::new("Answer saved successfully."))
}

/// GET /get-next-question
///
/// Optional `?session_id=`; defaults to the most recent session.
pub async fn handle_get_next_question(
    State(state): State<AppState>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Result<Json<SessionQuestion>, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::Validation(format!(
            "Failed to retrieve next question: {}",
            e.body_text()
        ))
    })?;

    let next = state.interviews.next_question(query.session_id).await?;
    Ok(Json(next))
}

/// POST /clear-database
pub async fn handle_clear_database(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.interviews.clear().await?;
    Ok(MessageResponse::new("Database cleared successfully"))
}

fn upload_rejected(details: String) -> AppError {
    AppError::Validation(format!("Failed to process upload: {details}"))
}
