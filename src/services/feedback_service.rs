// src/services/feedback_service.rs - testimonial submission and moderation
use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::dtos::feedback::{CreateFeedbackDTO, non_blank};
use crate::error::AppError;
use crate::models::feedback::{Feedback, NewFeedback};
use crate::repositories::FeedbackRepository;
use crate::services::clock::Clock;

#[derive(Clone)]
pub struct FeedbackService {
    repo: Arc<dyn FeedbackRepository>,
    clock: Arc<dyn Clock>,
}

impl FeedbackService {
    pub fn new(repo: Arc<dyn FeedbackRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Stored unapproved, whatever the client sent.
    pub async fn submit(&self, dto: CreateFeedbackDTO) -> Result<Feedback, AppError> {
        dto.validate()
            .map_err(|cause| AppError::validation("Error saving feedback", cause))?;

        let new_feedback = NewFeedback {
            client_name: dto.client_name,
            address: non_blank(dto.address),
            occupation: non_blank(dto.occupation),
            service_taken: dto.service_taken,
            feedback_content: dto.feedback_content,
            created_at: self.clock.now(),
        };

        let feedback = self.repo.insert(new_feedback).await?;
        info!("feedback {} submitted, awaiting approval", feedback.id);
        Ok(feedback)
    }

    pub async fn list_approved(&self) -> Result<Vec<Feedback>, AppError> {
        Ok(self.repo.list_by_approval(true).await?)
    }

    pub async fn list_pending(&self) -> Result<Vec<Feedback>, AppError> {
        Ok(self.repo.list_by_approval(false).await?)
    }

    /// Unconditional and idempotent; an unknown id is not an error.
    pub async fn approve(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.approve(id, self.clock.now()).await? {
            info!("feedback {} approved", id);
        } else {
            info!("approve of unknown feedback {} ignored", id);
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            info!("deleted feedback {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryFeedbackRepository;
    use crate::services::clock::ManualClock;

    fn service(clock: Arc<ManualClock>) -> FeedbackService {
        FeedbackService::new(Arc::new(MemoryFeedbackRepository::default()), clock)
    }

    fn sharma() -> CreateFeedbackDTO {
        CreateFeedbackDTO {
            client_name: "A. Sharma".into(),
            address: Some("   ".into()),
            occupation: Some("Engineer".into()),
            service_taken: "Property Dispute".into(),
            feedback_content: "Great service".into(),
        }
    }

    #[tokio::test]
    async fn submission_is_pending_until_approved() {
        let svc = service(Arc::new(ManualClock::at_millis(1_000)));
        let fb = svc.submit(sharma()).await.unwrap();
        assert!(!fb.is_approved);
        assert_eq!(fb.address, None);
        assert_eq!(fb.occupation.as_deref(), Some("Engineer"));

        assert!(svc.list_approved().await.unwrap().is_empty());
        assert_eq!(svc.list_pending().await.unwrap()[0].id, fb.id);

        svc.approve(fb.id).await.unwrap();
        assert_eq!(svc.list_approved().await.unwrap()[0].id, fb.id);
        assert!(svc.list_pending().await.unwrap().is_empty());

        // approving twice changes nothing
        svc.approve(fb.id).await.unwrap();
        assert_eq!(svc.list_approved().await.unwrap().len(), 1);
        assert!(svc.list_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_are_newest_first() {
        let clock = Arc::new(ManualClock::at_millis(1_000));
        let svc = service(clock.clone());
        let first = svc.submit(sharma()).await.unwrap();
        clock.advance_millis(5);
        let second = svc.submit(sharma()).await.unwrap();

        let pending: Vec<Uuid> = svc.list_pending().await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(pending, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn missing_required_fields_are_bad_requests() {
        let svc = service(Arc::new(ManualClock::at_millis(1_000)));
        let mut dto = sharma();
        dto.feedback_content = String::new();
        assert!(matches!(svc.submit(dto).await, Err(AppError::Validation { .. })));
        assert!(svc.list_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_works_from_either_state_and_on_unknown_ids() {
        let svc = service(Arc::new(ManualClock::at_millis(1_000)));
        let pending = svc.submit(sharma()).await.unwrap();
        let approved = svc.submit(sharma()).await.unwrap();
        svc.approve(approved.id).await.unwrap();

        svc.delete(pending.id).await.unwrap();
        svc.delete(approved.id).await.unwrap();
        svc.delete(Uuid::new_v4()).await.unwrap();
        svc.approve(Uuid::new_v4()).await.unwrap();

        assert!(svc.list_pending().await.unwrap().is_empty());
        assert!(svc.list_approved().await.unwrap().is_empty());
    }
}
