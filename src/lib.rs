pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use actix_web::{middleware::from_fn, web, HttpResponse};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, Identity, SessionStore};
pub use catalog::CatalogService;
pub use db::{Book, BookStore, Review, User, UserDirectory};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub catalog: Arc<CatalogService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// State over the seeded catalog with no users and no sessions.
    pub fn new(config: Settings) -> Self {
        Self::with_books(config, BookStore::seeded())
    }

    pub fn with_books(config: Settings, books: BookStore) -> Self {
        let auth_service = AuthService::from_config(
            &config.auth,
            UserDirectory::new(),
            SessionStore::new(),
        );

        Self {
            config: Arc::new(config),
            catalog: Arc::new(CatalogService::new(books)),
            auth_service: Arc::new(auth_service),
        }
    }
}

/// Registers every route. Public catalog routes sit at the root; review
/// writes and logout sit behind the session gate under `/customer/auth`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use auth::handlers as auth_handlers;
    use catalog::handlers as catalog_handlers;

    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .route("/health", web::get().to(health_check))
    .route("/", web::get().to(catalog_handlers::list_books))
    .route("/isbn/{isbn}", web::get().to(catalog_handlers::book_by_isbn))
    .route("/author/{author}", web::get().to(catalog_handlers::books_by_author))
    .route("/title/{title}", web::get().to(catalog_handlers::books_by_title))
    .route("/review/{isbn}", web::get().to(catalog_handlers::book_reviews))
    .route("/register", web::post().to(auth_handlers::register))
    .service(
        web::scope("/customer")
            .route("/login", web::post().to(auth_handlers::login))
            .service(
                web::scope("/auth")
                    .wrap(from_fn(auth::session_gate))
                    .route("/review/{isbn}", web::put().to(catalog_handlers::put_review))
                    .route("/review/{isbn}", web::delete().to(catalog_handlers::delete_review))
                    .route("/logout", web::post().to(auth_handlers::logout)),
            ),
    );
}
