// src/handlers/feedback_handlers.rs - testimonials and the moderation queue

use actix_web::{HttpResponse, delete, get, post, put, web};
use log::debug;

use crate::AppState;
use crate::dtos::feedback::CreateFeedbackDTO;
use crate::dtos::post::MessageResponse;
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::middleware::auth_extractor::AdminUser;

/// POST /add-feedback
#[post("/add-feedback")]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    body: web::Json<CreateFeedbackDTO>,
) -> Result<HttpResponse, AppError> {
    let feedback = state.feedback.submit(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(feedback))
}

/// GET /testimonials - approved only, for the public site
#[get("/testimonials")]
pub async fn list_testimonials(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let approved = state.feedback.list_approved().await?;
    Ok(HttpResponse::Ok().json(approved))
}

/// GET /feedback/pending
#[get("/feedback/pending")]
pub async fn list_pending_feedback(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let pending = state.feedback.list_pending().await?;
    Ok(HttpResponse::Ok().json(pending))
}

/// PUT /feedback/approve/{id}
#[put("/feedback/approve/{id}")]
pub async fn approve_feedback(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    debug!("feedback {} approved by {}", id, admin.subject);
    state.feedback.approve(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Feedback approved.")))
}

/// DELETE /feedback/{id}
#[delete("/feedback/{id}")]
pub async fn delete_feedback(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    debug!("feedback {} delete requested by {}", id, admin.subject);
    state.feedback.delete(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Feedback deleted.")))
}
