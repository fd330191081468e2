pub mod feedback_handlers;
pub mod post_handlers;
pub mod upload_handlers;

use uuid::Uuid;

use crate::error::AppError;

/// Record ids in paths are UUIDs; anything else is a client error.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|e| AppError::BadRequest(format!("Invalid id `{}`: {}", raw, e)))
}
