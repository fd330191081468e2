// src/services/image_storage.rs - where post images end up (local disk or Supabase Storage)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{info, warn};
use mime::Mime;
use reqwest::Client;
use thiserror::Error;
use urlencoding::encode;
use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Prefix of references handed out by [`LocalImageStore`]; also the route the
/// files are served from.
pub const LOCAL_URL_PREFIX: &str = "uploads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("image exceeds {max} bytes")]
    TooLarge { max: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("object storage error: {0}")]
    Remote(String),
}

/// An image part received with a post submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<Mime>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn validate(&self) -> Result<(), StorageError> {
        match &self.content_type {
            Some(ct) if ct.type_() == mime::IMAGE => {}
            Some(ct) => return Err(StorageError::UnsupportedType(ct.to_string())),
            None => return Err(StorageError::UnsupportedType("unknown".to_string())),
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(StorageError::TooLarge { max: MAX_IMAGE_BYTES });
        }
        Ok(())
    }

    /// Extension from the client's file name, else from the content type.
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        from_name.unwrap_or_else(|| match self.content_type.as_ref().map(|ct| ct.subtype().as_str()) {
            Some("jpeg") => "jpg".to_string(),
            Some("svg+xml") => "svg".to_string(),
            Some(sub) if sub.chars().all(|c| c.is_ascii_alphanumeric()) => sub.to_string(),
            _ => "bin".to_string(),
        })
    }

    /// `<field>-<millis>-<random>.<ext>`; never derived from the client's path.
    pub fn object_name(&self) -> String {
        let field: String = self
            .field_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        let field = if field.is_empty() { "image".to_string() } else { field };
        let nonce = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}.{}",
            field,
            chrono::Utc::now().timestamp_millis(),
            &nonce[..8],
            self.extension()
        )
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists the image and returns the reference to store on the post.
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError>;
    /// Best-effort removal of a reference returned by `store`.
    async fn discard(&self, reference: &str) -> Result<(), StorageError>;
}

/// Files under a local directory, served back by `GET /uploads/{filename}`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError> {
        upload.validate()?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let name = upload.object_name();
        let path = self.dir.join(&name);
        tokio::fs::write(&path, &upload.bytes).await?;
        info!("stored image {} ({} bytes)", path.display(), upload.bytes.len());
        Ok(format!("{}/{}", LOCAL_URL_PREFIX, name))
    }

    async fn discard(&self, reference: &str) -> Result<(), StorageError> {
        let Some(name) = reference
            .strip_prefix(LOCAL_URL_PREFIX)
            .map(|rest| rest.trim_start_matches('/'))
            .and_then(|rest| Path::new(rest).file_name())
        else {
            warn!("not a local image reference: {}", reference);
            return Ok(());
        };
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Objects in a public Supabase Storage bucket.
#[derive(Clone)]
pub struct SupabaseImageStore {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseImageStore {
    pub fn new(client: Client, base_url: &str, service_key: &str, bucket: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            bucket: bucket.to_string(),
        }
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, encode(name))
    }

    fn public_prefix(&self) -> String {
        format!("{}/storage/v1/object/public/{}/", self.base_url, self.bucket)
    }

    pub fn public_url(&self, name: &str) -> String {
        format!("{}{}", self.public_prefix(), encode(name))
    }
}

#[async_trait]
impl ImageStore for SupabaseImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError> {
        upload.validate()?;
        let name = upload.object_name();
        let content_type = upload
            .content_type
            .as_ref()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let response = self
            .client
            .post(self.object_url(&name))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(upload.bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Remote(format!("{} -> {}", status.as_u16(), body)));
        }

        info!("uploaded image {} to bucket {}", name, self.bucket);
        Ok(self.public_url(&name))
    }

    async fn discard(&self, reference: &str) -> Result<(), StorageError> {
        let prefix = self.public_prefix();
        let Some(encoded) = reference.strip_prefix(prefix.as_str()) else {
            warn!("not a bucket reference: {}", reference);
            return Ok(());
        };
        let name = urlencoding::decode(encoded)
            .map_err(|e| StorageError::Remote(format!("bad object name: {}", e)))?;

        let response = self
            .client
            .delete(self.object_url(&name))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 404 {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Remote(format!("{} -> {}", status.as_u16(), body)));
        }
        Ok(())
    }
}
