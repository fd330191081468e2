// src/repositories/post_repository.rs - posts table over the deadpool connection pool

use async_trait::async_trait;
use deadpool_postgres::Pool;
use log::debug;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{PostRepository, RepoError};
use crate::models::post::{NewPost, Post};

const SELECT_POSTS: &str = "SELECT id, title, slug, content, author, category, image_url, \
                            created_at, updated_at FROM posts";

#[derive(Clone)]
pub struct PgPostRepository {
    pool: Pool,
}

impl PgPostRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: &Row) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        content: row.get("content"),
        author: row.get("author"),
        category: row.get("category"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (id, title, slug, content, author, category, image_url, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
                 RETURNING id, title, slug, content, author, category, image_url, created_at, updated_at",
                &[
                    &Uuid::new_v4(),
                    &post.title,
                    &post.slug,
                    &post.content,
                    &post.author,
                    &post.category,
                    &post.image_url,
                    &post.created_at,
                ],
            )
            .await?;
        Ok(row_to_post(&row))
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("{SELECT_POSTS} ORDER BY created_at DESC");
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("{SELECT_POSTS} WHERE lower(category) = lower($1) ORDER BY created_at DESC");
        let rows = client.query(sql.as_str(), &[&category]).await?;
        debug!("category {:?} matched {} posts", category, rows.len());
        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("{SELECT_POSTS} WHERE slug = $1");
        let row = client.query_opt(sql.as_str(), &[&slug]).await?;
        Ok(row.as_ref().map(row_to_post))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let client = self.pool.get().await?;
        let removed = client.execute("DELETE FROM posts WHERE id = $1", &[&id]).await?;
        Ok(removed > 0)
    }
}
