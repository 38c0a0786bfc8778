//! Exam attempt domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A graded attempt as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExamAttempt {
    pub id: i64,
    pub user_id: i64,
    pub exam_id: i64,
    pub score_achieved: f64,
    pub total_possible_score: f64,
    pub percentage_score: f64,
    pub submitted_at: DateTime<Utc>,
}

/// Attempt submission request. The submitting user comes from the token,
/// never from the body.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    pub exam_id: i64,
    #[validate(range(min = 0.0, message = "score_achieved must not be negative"))]
    pub score_achieved: f64,
    pub total_possible_score: f64,
}

/// An attempt joined with its exam title, for the caller's own history
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AttemptWithExam {
    pub id: i64,
    pub exam_id: i64,
    pub exam_title: String,
    pub score_achieved: f64,
    pub total_possible_score: f64,
    pub percentage_score: f64,
    pub submitted_at: DateTime<Utc>,
}

/// A single row of an exam's result sheet (admin view)
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ExamResultRow {
    pub attempt_id: i64,
    pub user_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub score_achieved: f64,
    pub total_possible_score: f64,
    pub percentage_score: f64,
    pub submitted_at: DateTime<Utc>,
}

/// Result sheet for one exam
#[derive(Debug, Serialize)]
pub struct ExamResultsResponse {
    pub exam_id: i64,
    pub exam_title: String,
    pub results: Vec<ExamResultRow>,
}

/// A student enrollment row (admin view across all exams)
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EnrollmentRow {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub exam_id: i64,
    pub exam_title: String,
    pub score_achieved: f64,
    pub total_possible_score: f64,
    pub submitted_at: DateTime<Utc>,
}
