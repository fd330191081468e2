use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local, lost on restart. For local development.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageBackend {
    Local,
    Supabase { url: String, service_key: String, bucket: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub storage: StorageBackend,
    pub image_backend: ImageBackend,
    pub upload_dir: PathBuf,
    pub admin_jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(p) => p.parse().with_context(|| format!("PORT is not a valid port: {}", p))?,
            None => 8080,
        };

        let allowed_origins = parse_origins(
            &get("ALLOWED_ORIGINS").unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".into()),
        );

        let storage = match get("STORAGE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => bail!("STORAGE_BACKEND must be `postgres` or `memory`, got `{}`", other),
        };

        let image_backend = match get("IMAGE_BACKEND").as_deref().unwrap_or("local") {
            "local" => ImageBackend::Local,
            "supabase" => ImageBackend::Supabase {
                url: get("SUPABASE_URL").context("SUPABASE_URL not set")?,
                service_key: get("SUPABASE_SERVICE_ROLE_KEY").context("SUPABASE_SERVICE_ROLE_KEY not set")?,
                bucket: get("SUPABASE_BUCKET").unwrap_or_else(|| "post-images".into()),
            },
            other => bail!("IMAGE_BACKEND must be `local` or `supabase`, got `{}`", other),
        };

        let upload_dir = PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "./uploads".into()));
        let admin_jwt_secret = get("ADMIN_JWT_SECRET").context("ADMIN_JWT_SECRET not set")?;
        if admin_jwt_secret.len() < 16 {
            bail!("ADMIN_JWT_SECRET must be at least 16 characters");
        }

        Ok(Self { port, allowed_origins, storage, image_backend, upload_dir, admin_jwt_secret })
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn get_pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);
    cfg.port = match env::var("PG_PORT") {
        Ok(p) => Some(p.parse().context("PG_PORT is not a valid port")?),
        Err(_) => None,
    };

    // PoolConfig.max_size is a plain usize
    if cfg.pool.is_none() {
        cfg.pool = Some(PoolConfig::default());
    }
    if let Some(ref mut pcfg) = cfg.pool {
        pcfg.max_size = 16;
    }

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}
