// src/repositories/feedback_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{FeedbackRepository, RepoError};
use crate::models::feedback::{Feedback, NewFeedback};

#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: Pool,
}

impl PgFeedbackRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn row_to_feedback(row: &Row) -> Feedback {
    Feedback {
        id: row.get("id"),
        client_name: row.get("client_name"),
        address: row.get("address"),
        occupation: row.get("occupation"),
        service_taken: row.get("service_taken"),
        feedback_content: row.get("feedback_content"),
        is_approved: row.get("is_approved"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, RepoError> {
        let client = self.pool.get().await?;
        // is_approved is a literal, not a parameter
        let row = client
            .query_one(
                "INSERT INTO feedback (id, client_name, address, occupation, service_taken, \
                 feedback_content, is_approved, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $7) \
                 RETURNING id, client_name, address, occupation, service_taken, feedback_content, \
                 is_approved, created_at, updated_at",
                &[
                    &Uuid::new_v4(),
                    &feedback.client_name,
                    &feedback.address,
                    &feedback.occupation,
                    &feedback.service_taken,
                    &feedback.feedback_content,
                    &feedback.created_at,
                ],
            )
            .await?;
        Ok(row_to_feedback(&row))
    }

    async fn list_by_approval(&self, approved: bool) -> Result<Vec<Feedback>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, client_name, address, occupation, service_taken, feedback_content, \
                 is_approved, created_at, updated_at FROM feedback \
                 WHERE is_approved = $1 ORDER BY created_at DESC",
                &[&approved],
            )
            .await?;
        Ok(rows.iter().map(row_to_feedback).collect())
    }

    async fn approve(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepoError> {
        let client = self.pool.get().await?;
        let updated = client
            .execute(
                "UPDATE feedback SET is_approved = TRUE, updated_at = $2 WHERE id = $1",
                &[&id, &at],
            )
            .await?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let client = self.pool.get().await?;
        let removed = client.execute("DELETE FROM feedback WHERE id = $1", &[&id]).await?;
        Ok(removed > 0)
    }
}
