// src/repositories/schema.rs
use deadpool_postgres::Pool;
use log::info;

use super::RepoError;

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id          UUID PRIMARY KEY,
    title       TEXT NOT NULL CHECK (btrim(title) <> ''),
    slug        TEXT NOT NULL,
    content     TEXT NOT NULL CHECK (btrim(content) <> ''),
    author      TEXT NOT NULL CHECK (btrim(author) <> ''),
    category    TEXT NOT NULL CHECK (btrim(category) <> ''),
    image_url   TEXT,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS posts_slug_key ON posts (slug);
CREATE INDEX IF NOT EXISTS posts_created_at_idx ON posts (created_at DESC);
CREATE INDEX IF NOT EXISTS posts_category_lower_idx ON posts (lower(category));

CREATE TABLE IF NOT EXISTS feedback (
    id                UUID PRIMARY KEY,
    client_name       TEXT NOT NULL CHECK (btrim(client_name) <> ''),
    address           TEXT,
    occupation        TEXT,
    service_taken     TEXT NOT NULL CHECK (btrim(service_taken) <> ''),
    feedback_content  TEXT NOT NULL CHECK (btrim(feedback_content) <> ''),
    is_approved       BOOLEAN NOT NULL DEFAULT FALSE,
    created_at        TIMESTAMPTZ NOT NULL,
    updated_at        TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS feedback_approval_created_idx ON feedback (is_approved, created_at DESC);
"#;

/// Creates tables and indexes if they are missing. Safe to run on every start.
pub async fn ensure_schema(pool: &Pool) -> Result<(), RepoError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA_SQL).await?;
    info!("database schema ready");
    Ok(())
}
