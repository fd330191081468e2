//! Backend for the firm's website: blog posts and moderated client testimonials.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use std::path::PathBuf;

use actix_web::web;

use crate::error::AppError;
use crate::handlers::feedback_handlers::{
    approve_feedback, delete_feedback, list_pending_feedback, list_testimonials, submit_feedback,
};
use crate::handlers::post_handlers::{
    create_post, delete_post, get_post_by_slug, list_posts, list_posts_by_category,
};
use crate::handlers::upload_handlers::{health, serve_upload};
use crate::services::admin_auth::AdminAuth;
use crate::services::feedback_service::FeedbackService;
use crate::services::post_service::PostService;

/// Everything a request handler needs, built once in `main` and shared via `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub feedback: FeedbackService,
    pub admin_auth: AdminAuth,
    pub upload_dir: PathBuf,
}

/// Registers every route. Used by `main` and by the HTTP tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_posts)
        .service(list_posts_by_category)
        .service(get_post_by_slug)
        .service(create_post)
        .service(delete_post)
        .service(submit_feedback)
        .service(list_testimonials)
        .service(list_pending_feedback)
        .service(approve_feedback)
        .service(delete_feedback)
        .service(serve_upload)
        .service(health);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid JSON body: {}", err)).into())
}
