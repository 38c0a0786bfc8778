//! Exam management HTTP handlers

use crate::{
    auth::middleware::AdminContext,
    error::AppError,
    middleware::AppState,
    models::attempt::ExamResultsResponse,
    models::exam::{CreateExamRequest, UpdateExamRequest},
    repository::{AttemptRepository, ExamRepository},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// Create an exam (admin only)
pub async fn create_exam(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Json(req): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = ExamRepository::new(state.db.clone());
    let exam = repo.create(&req, admin.0.user_id).await?;

    tracing::info!(exam_id = exam.id, created_by = admin.0.user_id, "Exam created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Exam created successfully",
            "exam": exam
        })),
    ))
}

/// List all exams (any authenticated user)
pub async fn list_exams(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ExamRepository::new(state.db.clone());
    let exams = repo.list().await?;

    Ok(Json(json!({
        "exams": exams,
        "count": exams.len()
    })))
}

/// Fetch one exam (any authenticated user)
pub async fn get_exam(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ExamRepository::new(state.db.clone());
    let exam = repo.find_by_id(id).await?.ok_or(AppError::not_found("exam"))?;

    Ok(Json(exam))
}

/// Partially update an exam (admin only)
pub async fn update_exam(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if req.is_empty() {
        return Err(AppError::BadRequest(
            "No update fields provided".to_string(),
        ));
    }

    let repo = ExamRepository::new(state.db.clone());
    let exam = repo
        .update(id, &req)
        .await?
        .ok_or(AppError::not_found("exam"))?;

    Ok(Json(json!({
        "message": "Exam updated successfully",
        "exam": exam
    })))
}

/// Delete an exam (admin only)
pub async fn delete_exam(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ExamRepository::new(state.db.clone());

    if !repo.delete(id).await? {
        return Err(AppError::not_found("exam"));
    }

    Ok(Json(json!({
        "message": "Exam deleted successfully"
    })))
}

/// Result sheet for one exam (admin only)
pub async fn exam_results(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam_repo = ExamRepository::new(state.db.clone());
    let exam = exam_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::not_found("exam"))?;

    let attempt_repo = AttemptRepository::new(state.db.clone());
    let results = attempt_repo.list_for_exam(id).await?;

    Ok(Json(ExamResultsResponse {
        exam_id: exam.id,
        exam_title: exam.title,
        results,
    }))
}
