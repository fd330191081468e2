// src/repositories/memory.rs - process-local stores for tests and STORAGE_BACKEND=memory

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FeedbackRepository, PostRepository, RepoError};
use crate::models::feedback::{Feedback, NewFeedback};
use crate::models::post::{NewPost, Post};

/// Newest first. Rows with equal timestamps keep reverse insertion order.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[derive(Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(RepoError::Duplicate("posts_slug_key".to_string()));
        }
        let post = post.into_post(Uuid::new_v4());
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(newest_first(&posts[..], |p| p.created_at))
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError> {
        let wanted = category.to_lowercase();
        let posts = self.posts.read().await;
        let matching: Vec<Post> = posts
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |p| p.created_at))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryFeedbackRepository {
    items: RwLock<Vec<Feedback>>,
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, RepoError> {
        let feedback = feedback.into_feedback(Uuid::new_v4());
        self.items.write().await.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_by_approval(&self, approved: bool) -> Result<Vec<Feedback>, RepoError> {
        let items = self.items.read().await;
        let matching: Vec<Feedback> = items
            .iter()
            .filter(|f| f.is_approved == approved)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |f| f.created_at))
    }

    async fn approve(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepoError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|f| f.id == id) {
            Some(item) => {
                item.approve(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|f| f.id != id);
        Ok(items.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn new_post(slug: &str, category: &str, created_at: DateTime<Utc>) -> NewPost {
        NewPost {
            title: "Title".into(),
            slug: slug.into(),
            content: "Body".into(),
            author: "Author".into(),
            category: category.into(),
            image_url: None,
            created_at,
        }
    }

    fn new_feedback(name: &str, created_at: DateTime<Utc>) -> NewFeedback {
        NewFeedback {
            client_name: name.into(),
            address: None,
            occupation: None,
            service_taken: "Property Dispute".into(),
            feedback_content: "Great service".into(),
            created_at,
        }
    }

    #[tokio::test]
    async fn same_literal_slug_twice_is_a_duplicate() {
        let repo = MemoryPostRepository::default();
        repo.insert(new_post("contract-law-basics-1", "Contracts", at(1))).await.unwrap();
        let err = repo
            .insert(new_post("contract-law-basics-1", "Contracts", at(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let repo = MemoryPostRepository::default();
        repo.insert(new_post("b", "Tax", at(20))).await.unwrap();
        repo.insert(new_post("a", "Tax", at(10))).await.unwrap();
        repo.insert(new_post("c", "Tax", at(30))).await.unwrap();

        let slugs: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn category_match_ignores_case_but_not_hyphens() {
        let repo = MemoryPostRepository::default();
        repo.insert(new_post("x", "Family Law", at(1))).await.unwrap();

        assert_eq!(repo.list_by_category("family law").await.unwrap().len(), 1);
        assert_eq!(repo.list_by_category("FAMILY LAW").await.unwrap().len(), 1);
        assert!(repo.list_by_category("family-law").await.unwrap().is_empty());
        assert!(repo.list_by_category("Tax").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_id_reports_nothing_removed() {
        let repo = MemoryPostRepository::default();
        let post = repo.insert(new_post("x", "Tax", at(1))).await.unwrap();
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
        assert!(repo.delete(post.id).await.unwrap());
        assert!(repo.find_by_slug("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn approval_moves_feedback_between_lists() {
        let repo = MemoryFeedbackRepository::default();
        let first = repo.insert(new_feedback("A", at(1))).await.unwrap();
        repo.insert(new_feedback("B", at(2))).await.unwrap();

        let pending = repo.list_by_approval(false).await.unwrap();
        assert_eq!(pending.iter().map(|f| f.client_name.as_str()).collect::<Vec<_>>(), vec!["B", "A"]);
        assert!(repo.list_by_approval(true).await.unwrap().is_empty());

        assert!(repo.approve(first.id, at(3)).await.unwrap());
        let approved = repo.list_by_approval(true).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, first.id);
        assert_eq!(approved[0].updated_at, at(3));
        assert_eq!(repo.list_by_approval(false).await.unwrap().len(), 1);

        assert!(!repo.approve(Uuid::new_v4(), at(4)).await.unwrap());
    }
}
