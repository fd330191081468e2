// src/main.rs
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info, warn};
use reqwest::Client;

use lawfirm_content_be::config::{self, AppConfig, ImageBackend, StorageBackend};
use lawfirm_content_be::repositories::{
    FeedbackRepository, MemoryFeedbackRepository, MemoryPostRepository, PgFeedbackRepository,
    PgPostRepository, PostRepository, schema,
};
use lawfirm_content_be::services::admin_auth::AdminAuth;
use lawfirm_content_be::services::clock::{Clock, SystemClock};
use lawfirm_content_be::services::feedback_service::FeedbackService;
use lawfirm_content_be::services::image_storage::{ImageStore, LocalImageStore, SupabaseImageStore};
use lawfirm_content_be::services::post_service::PostService;
use lawfirm_content_be::{AppState, configure_routes};

fn mask_key(k: &str) -> String {
    if k.len() <= 8 { "[REDACTED]".to_string() } else { format!("{}***{}", &k[..4], &k[k.len() - 4..]) }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let (post_repo, feedback_repo): (Arc<dyn PostRepository>, Arc<dyn FeedbackRepository>) = match cfg.storage {
        StorageBackend::Postgres => {
            let pg_pool = match config::get_pg_pool() {
                Ok(p) => p,
                Err(e) => {
                    error!("Failed to create PG pool: {:#}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = schema::ensure_schema(&pg_pool).await {
                error!("Failed to prepare database schema: {}", e);
                std::process::exit(1);
            }
            let posts: Arc<dyn PostRepository> = Arc::new(PgPostRepository::new(pg_pool.clone()));
            let feedback: Arc<dyn FeedbackRepository> = Arc::new(PgFeedbackRepository::new(pg_pool));
            (posts, feedback)
        }
        StorageBackend::Memory => {
            warn!("STORAGE_BACKEND=memory: posts and feedback are lost on restart");
            let posts: Arc<dyn PostRepository> = Arc::new(MemoryPostRepository::default());
            let feedback: Arc<dyn FeedbackRepository> = Arc::new(MemoryFeedbackRepository::default());
            (posts, feedback)
        }
    };

    let images: Arc<dyn ImageStore> = match &cfg.image_backend {
        ImageBackend::Local => {
            info!("Storing images under {}", cfg.upload_dir.display());
            Arc::new(LocalImageStore::new(cfg.upload_dir.clone()))
        }
        ImageBackend::Supabase { url, service_key, bucket } => {
            info!("Storing images in Supabase bucket {} at {}", bucket, url);
            info!("Supabase Key: {}", mask_key(service_key));
            let http_client = match Client::builder().user_agent("lawfirm-content-be/0.1").build() {
                Ok(c) => c,
                Err(e) => {
                    error!("Failed to build http client: {}", e);
                    std::process::exit(1);
                }
            };
            Arc::new(SupabaseImageStore::new(http_client, url, service_key, bucket))
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = web::Data::new(AppState {
        posts: PostService::new(post_repo, images, clock.clone()),
        feedback: FeedbackService::new(feedback_repo, clock),
        admin_auth: AdminAuth::new(&cfg.admin_jwt_secret),
        upload_dir: cfg.upload_dir.clone(),
    });

    let allowed_origins = cfg.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept", "x-requested-with"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
