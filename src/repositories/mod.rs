pub mod feedback_repository;
pub mod memory;
pub mod post_repository;
pub mod schema;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::models::feedback::{Feedback, NewFeedback};
use crate::models::post::{NewPost, Post};

pub use feedback_repository::PgFeedbackRepository;
pub use memory::{MemoryFeedbackRepository, MemoryPostRepository};
pub use post_repository::PgPostRepository;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("postgres error: {0}")]
    Postgres(tokio_postgres::Error),
    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("duplicate value violates `{0}`")]
    Duplicate(String),
}

impl From<tokio_postgres::Error> for RepoError {
    fn from(err: tokio_postgres::Error) -> Self {
        if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            let constraint = err
                .as_db_error()
                .and_then(|db| db.constraint())
                .unwrap_or("unique")
                .to_string();
            return RepoError::Duplicate(constraint);
        }
        RepoError::Postgres(err)
    }
}

/// Persistence for blog posts. Every listing is newest-created first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fails with [`RepoError::Duplicate`] when the slug is already taken.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;
    /// Case-insensitive exact match on `category`.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// Persistence for testimonials.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Always stores the row unapproved.
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, RepoError>;
    async fn list_by_approval(&self, approved: bool) -> Result<Vec<Feedback>, RepoError>;
    /// Returns whether a row matched.
    async fn approve(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}
