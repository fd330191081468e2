// src/services/post_service.rs - slugging, uniqueness and rendering for blog posts
use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::dtos::post::CreatePostDTO;
use crate::error::AppError;
use crate::models::post::{NewPost, Post};
use crate::repositories::{PostRepository, RepoError};
use crate::services::clock::Clock;
use crate::services::image_storage::{ImageStore, ImageUpload};
use crate::services::markdown::MarkdownRenderer;
use crate::services::slug::post_slug;

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    images: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,
    renderer: MarkdownRenderer,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, images: Arc<dyn ImageStore>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, images, clock, renderer: MarkdownRenderer::default() }
    }

    /// Validates, uploads the optional image, derives the slug and inserts.
    /// A slug collision surfaces as [`AppError::DuplicateTitle`].
    pub async fn create(&self, dto: CreatePostDTO, image: Option<ImageUpload>) -> Result<Post, AppError> {
        dto.validate().map_err(|cause| AppError::validation("Error saving post", cause))?;
        if let Some(upload) = &image {
            upload.validate()?;
        }

        let created_at = self.clock.now();
        let slug = post_slug(&dto.title, created_at.timestamp_millis());

        let image_url = match image {
            Some(upload) => Some(self.images.store(upload).await?),
            None => None,
        };

        let new_post = NewPost {
            title: dto.title,
            slug,
            content: dto.content,
            author: dto.author,
            category: dto.category,
            image_url: image_url.clone(),
            created_at,
        };

        match self.repo.insert(new_post).await {
            Ok(post) => {
                info!("created post {} ({})", post.slug, post.id);
                Ok(post)
            }
            Err(err) => {
                if let Some(reference) = &image_url {
                    if let Err(e) = self.images.discard(reference).await {
                        warn!("failed to clean up image {}: {}", reference, e);
                    }
                }
                match err {
                    RepoError::Duplicate(constraint) => {
                        warn!("slug collision on {}", constraint);
                        Err(AppError::DuplicateTitle)
                    }
                    other => Err(AppError::storage("Error saving post", other)),
                }
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.repo.list_all().await?)
    }

    /// Exact, case-insensitive match on the raw category name.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, AppError> {
        Ok(self.repo.list_by_category(category).await?)
    }

    /// The returned post carries HTML in `content`; the stored row keeps Markdown.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        let mut post = self.repo.find_by_slug(slug).await?.ok_or(AppError::NotFound("Post"))?;
        post.content = self.renderer.render(&post.content);
        Ok(post)
    }

    /// Succeeds whether or not the post existed.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            info!("deleted post {}", id);
        } else {
            info!("delete of unknown post {} ignored", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryPostRepository;
    use crate::services::clock::ManualClock;
    use crate::services::image_storage::LocalImageStore;

    const T: i64 = 1_700_000_000_000;

    fn service(clock: Arc<ManualClock>, upload_dir: &std::path::Path) -> PostService {
        PostService::new(
            Arc::new(MemoryPostRepository::default()),
            Arc::new(LocalImageStore::new(upload_dir)),
            clock,
        )
    }

    fn dto(title: &str, category: &str) -> CreatePostDTO {
        CreatePostDTO {
            title: title.into(),
            content: "## Overview\n\nA contract needs *offer* and *acceptance*.".into(),
            author: "R. Mehta".into(),
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn identical_titles_get_distinct_slugs_over_time() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::at_millis(T));
        let svc = service(clock.clone(), dir.path());

        let first = svc.create(dto("Contract Law Basics", "Contracts"), None).await.unwrap();
        assert_eq!(first.slug, format!("contract-law-basics-{}", T));

        clock.advance_millis(1);
        let second = svc.create(dto("Contract Law Basics", "Contracts"), None).await.unwrap();
        assert_eq!(second.slug, format!("contract-law-basics-{}", T + 1));
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn same_title_in_same_instant_is_a_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Arc::new(ManualClock::at_millis(T)), dir.path());

        svc.create(dto("Contract Law Basics", "Contracts"), None).await.unwrap();
        let err = svc.create(dto("Contract Law Basics", "Contracts"), None).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateTitle));
    }

    #[tokio::test]
    async fn duplicate_discards_the_uploaded_image() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Arc::new(ManualClock::at_millis(T)), dir.path());
        let image = ImageUpload {
            field_name: "image".into(),
            file_name: Some("a.png".into()),
            content_type: Some(mime::IMAGE_PNG),
            bytes: b"png".to_vec(),
        };

        let first = svc.create(dto("Bail", "Criminal"), Some(image.clone())).await.unwrap();
        assert!(first.image_url.as_deref().unwrap().starts_with("uploads/image-"));

        let err = svc.create(dto("Bail", "Criminal"), Some(image)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateTitle));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_upload() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        let svc = service(Arc::new(ManualClock::at_millis(T)), &upload_dir);
        let image = ImageUpload {
            field_name: "image".into(),
            file_name: Some("a.png".into()),
            content_type: Some(mime::IMAGE_PNG),
            bytes: b"png".to_vec(),
        };

        let err = svc.create(dto("", "Contracts"), Some(image)).await.unwrap_err();
        match err {
            AppError::Validation { cause, .. } => assert!(cause.contains("title")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!upload_dir.exists());
    }

    #[tokio::test]
    async fn get_by_slug_renders_markdown_without_touching_storage() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Arc::new(ManualClock::at_millis(T)), dir.path());
        let created = svc.create(dto("Contract Law Basics", "Contracts"), None).await.unwrap();

        let fetched = svc.get_by_slug(&created.slug).await.unwrap();
        assert!(fetched.content.contains("<h2>Overview</h2>"));
        assert!(fetched.content.contains("<em>offer</em>"));

        let listed = svc.list_all().await.unwrap();
        assert_eq!(listed[0].content, created.content);

        let again = svc.get_by_slug(&created.slug).await.unwrap();
        assert_eq!(again.content, fetched.content);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Arc::new(ManualClock::at_millis(T)), dir.path());
        assert!(matches!(svc.get_by_slug("nope").await, Err(AppError::NotFound("Post"))));
    }

    #[tokio::test]
    async fn category_listing_and_idempotent_delete() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::at_millis(T));
        let svc = service(clock.clone(), dir.path());

        let older = svc.create(dto("Divorce FAQ", "Family Law"), None).await.unwrap();
        clock.advance_millis(10);
        let newer = svc.create(dto("Custody", "family law"), None).await.unwrap();

        let family = svc.list_by_category("FAMILY LAW").await.unwrap();
        assert_eq!(family.iter().map(|p| p.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
        assert!(svc.list_by_category("Tax").await.unwrap().is_empty());

        svc.delete(older.id).await.unwrap();
        svc.delete(older.id).await.unwrap();
        svc.delete(Uuid::new_v4()).await.unwrap();
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }
}
