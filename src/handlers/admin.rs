//! Admin-only HTTP handlers

use crate::{
    auth::middleware::AdminContext, error::AppError, middleware::AppState,
    repository::AttemptRepository,
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Every student exam attempt, joined with user and exam metadata
pub async fn list_enrollments(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(admin_id = admin.0.user_id, "Listing enrollments");

    let repo = AttemptRepository::new(state.db.clone());
    let enrollments = repo.list_enrollments().await?;

    Ok(Json(enrollments))
}
