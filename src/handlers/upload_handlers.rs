// src/handlers/upload_handlers.rs - serves images written by the local image store
use std::path::Path;

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::AppState;
use crate::error::AppError;

/// GET /uploads/{filename}
#[get("/uploads/{filename}")]
pub async fn serve_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = path.into_inner();

    // Sanitize filename to prevent directory traversal
    let safe_filename = Path::new(&filename)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| *name == filename)
        .ok_or(AppError::NotFound("Image"))?;

    let data = match tokio::fs::read(state.upload_dir.join(safe_filename)).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NotFound("Image")),
        Err(e) => return Err(AppError::storage("Failed to read image", e)),
    };

    Ok(HttpResponse::Ok().content_type(content_type_for(safe_filename)).body(data))
}

/// GET /health
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

fn content_type_for(filename: &str) -> mime::Mime {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("bmp") => mime::IMAGE_BMP,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
