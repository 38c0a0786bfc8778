//! Exam attempt HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::attempt::SubmitAttemptRequest,
    repository::{AttemptRepository, ExamRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// Record a graded attempt for the calling user
pub async fn submit_attempt(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if req.total_possible_score <= 0.0 {
        return Err(AppError::BadRequest(
            "total_possible_score must be positive".to_string(),
        ));
    }
    if req.score_achieved > req.total_possible_score {
        return Err(AppError::BadRequest(
            "score_achieved must not exceed total_possible_score".to_string(),
        ));
    }

    let exam_repo = ExamRepository::new(state.db.clone());
    if exam_repo.find_by_id(req.exam_id).await?.is_none() {
        return Err(AppError::not_found("exam"));
    }

    let percentage_score = req.score_achieved / req.total_possible_score * 100.0;

    let attempt_repo = AttemptRepository::new(state.db.clone());
    let attempt = attempt_repo
        .create(
            auth_context.user_id,
            req.exam_id,
            req.score_achieved,
            req.total_possible_score,
            percentage_score,
        )
        .await?;

    tracing::info!(
        attempt_id = attempt.id,
        user_id = auth_context.user_id,
        exam_id = req.exam_id,
        "Attempt recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Attempt recorded successfully",
            "attempt": attempt
        })),
    ))
}

/// The calling user's own attempt history
pub async fn list_my_attempts(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = AttemptRepository::new(state.db.clone());
    let attempts = repo.list_for_user(auth_context.user_id).await?;

    Ok(Json(json!({
        "attempts": attempts,
        "count": attempts.len()
    })))
}
