//! Exam domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Exam as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub passing_score: f64,
    pub created_by_user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Create exam request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.0, max = 100.0, message = "passing_score must be between 0 and 100"))]
    pub passing_score: f64,
}

/// Partial exam update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExamRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0, message = "passing_score must be between 0 and 100"))]
    pub passing_score: Option<f64>,
}

impl UpdateExamRequest {
    /// True when the request carries no field to update
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.duration_minutes.is_none()
            && self.passing_score.is_none()
    }
}
