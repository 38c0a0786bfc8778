//! Exam repository (database access layer)

use crate::{
    error::AppError,
    models::exam::{CreateExamRequest, Exam, UpdateExamRequest},
};
use sqlx::PgPool;

pub struct ExamRepository {
    db: PgPool,
}

impl ExamRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert a new exam and return the stored row
    pub async fn create(&self, req: &CreateExamRequest, created_by: i64) -> Result<Exam, AppError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (title, description, duration_minutes, passing_score, created_by_user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.duration_minutes)
        .bind(req.passing_score)
        .bind(created_by)
        .fetch_one(&self.db)
        .await?;

        Ok(exam)
    }

    /// List all exams, newest first
    pub async fn list(&self) -> Result<Vec<Exam>, AppError> {
        let exams =
            sqlx::query_as::<_, Exam>("SELECT * FROM exams ORDER BY created_at DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(exams)
    }

    /// Find an exam by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Exam>, AppError> {
        let exam = sqlx::query_as::<_, Exam>("SELECT * FROM exams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(exam)
    }

    /// Apply a partial update, leaving omitted fields untouched
    pub async fn update(&self, id: i64, req: &UpdateExamRequest) -> Result<Option<Exam>, AppError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration_minutes = COALESCE($4, duration_minutes),
                passing_score = COALESCE($5, passing_score)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.duration_minutes)
        .bind(req.passing_score)
        .fetch_optional(&self.db)
        .await?;

        Ok(exam)
    }

    /// Delete an exam; true when a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
