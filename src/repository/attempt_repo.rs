//! Exam attempt repository (database access layer)

use crate::{
    error::AppError,
    models::attempt::{AttemptWithExam, EnrollmentRow, ExamAttempt, ExamResultRow},
};
use sqlx::PgPool;

pub struct AttemptRepository {
    db: PgPool,
}

impl AttemptRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a graded attempt and return the stored row
    pub async fn create(
        &self,
        user_id: i64,
        exam_id: i64,
        score_achieved: f64,
        total_possible_score: f64,
        percentage_score: f64,
    ) -> Result<ExamAttempt, AppError> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            r#"
            INSERT INTO exam_attempts
                (user_id, exam_id, score_achieved, total_possible_score, percentage_score)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(exam_id)
        .bind(score_achieved)
        .bind(total_possible_score)
        .bind(percentage_score)
        .fetch_one(&self.db)
        .await?;

        Ok(attempt)
    }

    /// All attempts by one user, joined with exam titles, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<AttemptWithExam>, AppError> {
        let attempts = sqlx::query_as::<_, AttemptWithExam>(
            r#"
            SELECT
                a.id,
                a.exam_id,
                e.title AS exam_title,
                a.score_achieved,
                a.total_possible_score,
                a.percentage_score,
                a.submitted_at
            FROM exam_attempts a
            JOIN exams e ON a.exam_id = e.id
            WHERE a.user_id = $1
            ORDER BY a.submitted_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(attempts)
    }

    /// Result sheet for one exam, joined with student details, newest first
    pub async fn list_for_exam(&self, exam_id: i64) -> Result<Vec<ExamResultRow>, AppError> {
        let results = sqlx::query_as::<_, ExamResultRow>(
            r#"
            SELECT
                a.id AS attempt_id,
                a.user_id,
                u.name AS student_name,
                u.email AS student_email,
                a.score_achieved,
                a.total_possible_score,
                a.percentage_score,
                a.submitted_at
            FROM exam_attempts a
            JOIN users u ON a.user_id = u.id
            WHERE a.exam_id = $1
            ORDER BY a.submitted_at DESC
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }

    /// Every student attempt across all exams (admin enrollment view)
    pub async fn list_enrollments(&self) -> Result<Vec<EnrollmentRow>, AppError> {
        let enrollments = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT
                a.id AS enrollment_id,
                u.id AS student_id,
                u.name AS student_name,
                u.email AS student_email,
                e.id AS exam_id,
                e.title AS exam_title,
                a.score_achieved,
                a.total_possible_score,
                a.submitted_at
            FROM exam_attempts a
            JOIN users u ON a.user_id = u.id
            JOIN exams e ON a.exam_id = e.id
            WHERE u.role = 'student'
            ORDER BY a.submitted_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(enrollments)
    }
}
