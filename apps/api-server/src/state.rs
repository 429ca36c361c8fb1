//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    CategoryRepository, Clock, CommentRepository, LocationRepository, PostRepository, SystemClock,
    UserRepository,
};
use blogicum_infra::database::{
    self, DatabaseConfig, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresLocationRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state: one repository per aggregate, plus the
/// clock every visibility decision reads from.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Build the application state over a live database connection.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let db = database::connect(config)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            locations: Arc::new(PostgresLocationRepository::new(db)),
            clock: Arc::new(SystemClock),
        })
    }
}
