use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client testimonial. Only approved rows are shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub client_name: String,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub service_taken: String,
    pub feedback_content: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. There is no approval flag here: every submission starts unapproved.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub client_name: String,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub service_taken: String,
    pub feedback_content: String,
    pub created_at: DateTime<Utc>,
}

impl NewFeedback {
    pub fn into_feedback(self, id: Uuid) -> Feedback {
        Feedback {
            id,
            client_name: self.client_name,
            address: self.address,
            occupation: self.occupation,
            service_taken: self.service_taken,
            feedback_content: self.feedback_content,
            is_approved: false,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Moderation state as exposed by the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalState {
    Unapproved,
    Approved,
}

impl Feedback {
    pub fn approval_state(&self) -> ApprovalState {
        if self.is_approved {
            ApprovalState::Approved
        } else {
            ApprovalState::Unapproved
        }
    }

    /// One-way transition. Approving an already approved item only bumps `updated_at`.
    pub fn approve(&mut self, at: DateTime<Utc>) {
        self.is_approved = true;
        self.updated_at = at;
    }
}
