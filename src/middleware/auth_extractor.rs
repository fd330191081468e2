// src/middleware/auth_extractor.rs - admin gate for moderation endpoints
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use log::warn;

use crate::AppState;
use crate::error::AppError;
use crate::services::admin_auth::AuthError;

/// Extractor result: a caller holding a valid admin token.
#[derive(Debug)]
pub struct AdminUser {
    pub subject: String,
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<AdminUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Error::from))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;
    let header = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid header format".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid auth header format".to_string()))?;

    match state.admin_auth.verify(token) {
        Ok(claims) => Ok(AdminUser { subject: claims.sub }),
        Err(AuthError::NotAdmin(role)) => {
            warn!("moderation attempt with role {}", role);
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
        Err(e) => {
            warn!("rejected admin token: {}", e);
            Err(AppError::Unauthorized("Invalid token".to_string()))
        }
    }
}
