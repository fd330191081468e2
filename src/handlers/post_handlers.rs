// src/handlers/post_handlers.rs - blog post routes

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, post, web};
use futures::StreamExt;
use log::debug;

use crate::AppState;
use crate::dtos::post::{CreatePostDTO, MessageResponse};
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::middleware::auth_extractor::AdminUser;
use crate::services::image_storage::{ImageUpload, MAX_IMAGE_BYTES, StorageError};

const IMAGE_FIELD: &str = "image";
const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// GET /posts
#[get("/posts")]
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let posts = state.posts.list_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/category/{name}
#[get("/posts/category/{name}")]
pub async fn list_posts_by_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let posts = state.posts.list_by_category(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{slug} - content comes back as HTML
#[get("/posts/{slug}")]
pub async fn get_post_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let post = state.posts.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /add-post (multipart: title, content, author, category, optional image)
#[post("/add-post")]
pub async fn create_post(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse, AppError> {
    let (dto, image) = read_post_form(payload).await?;
    let post = state.posts.create(dto, image).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    debug!("post delete {} requested by {}", id, admin.subject);
    state.posts.delete(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted.")))
}

async fn read_post_form(mut payload: Multipart) -> Result<(CreatePostDTO, Option<ImageUpload>), AppError> {
    let mut dto = CreatePostDTO::default();
    let mut image = None;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().cloned();
        let limit = if name == IMAGE_FIELD { MAX_IMAGE_BYTES } else { MAX_TEXT_FIELD_BYTES };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| AppError::BadRequest(format!("Multipart read error: {}", e)))?;
            if bytes.len() + data.len() > limit {
                if name == IMAGE_FIELD {
                    return Err(StorageError::TooLarge { max: limit }.into());
                }
                return Err(AppError::BadRequest(format!("Field `{}` is too large", name)));
            }
            bytes.extend_from_slice(&data);
        }

        match name.as_str() {
            IMAGE_FIELD => {
                // browsers send an empty part when no file is chosen
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        field_name: IMAGE_FIELD.to_string(),
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "title" => dto.title = field_text(&name, bytes)?,
            "content" => dto.content = field_text(&name, bytes)?,
            "author" => dto.author = field_text(&name, bytes)?,
            "category" => dto.category = field_text(&name, bytes)?,
            other => debug!("ignoring multipart field {:?}", other),
        }
    }

    Ok((dto, image))
}

fn field_text(name: &str, bytes: Vec<u8>) -> Result<String, AppError> {
    String::from_utf8(bytes).map_err(|_| AppError::BadRequest(format!("Field `{}` is not valid UTF-8", name)))
}
