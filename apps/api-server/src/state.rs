//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, SeedSource};
use quill_core::services::{PostService, SeedImporter};
use quill_infra::{InMemoryPostRepository, JsonFileSeedSource};

#[cfg(feature = "mongo")]
use quill_infra::{DatabaseConnections, MongoPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub seed_source: Arc<dyn SeedSource>,
    #[cfg(feature = "mongo")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "mongo")]
        let (db, repo): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let repo: Arc<dyn PostRepository> =
                            Arc::new(MongoPostRepository::new(conn.posts()));
                        (Some(conn), repo)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryPostRepository::new()))
                    }
                }
            } else {
                tracing::warn!("MONGODB_URI not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryPostRepository::new()))
            }
        };

        #[cfg(not(feature = "mongo"))]
        let repo: Arc<dyn PostRepository> = {
            tracing::info!("Running without mongo feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        let seed_source = Arc::new(JsonFileSeedSource::new(&config.seed_file));

        tracing::info!(
            seed_file = %config.seed_file.display(),
            slug_writes = ?config.slug_writes,
            "Application state initialized"
        );

        Self {
            posts: PostService::new(repo).with_slug_writes(config.slug_writes),
            seed_source,
            #[cfg(feature = "mongo")]
            db,
        }
    }

    /// State over an explicit repository and seed source, with no database
    /// connection.
    pub fn with_parts(repo: Arc<dyn PostRepository>, seed_source: Arc<dyn SeedSource>) -> Self {
        Self {
            posts: PostService::new(repo),
            seed_source,
            #[cfg(feature = "mongo")]
            db: None,
        }
    }

    pub fn seed_importer(&self) -> SeedImporter {
        SeedImporter::new(self.posts.repository().clone(), self.seed_source.clone())
    }

    /// Name of the backing store, for health reporting.
    pub fn store_kind(&self) -> &'static str {
        #[cfg(feature = "mongo")]
        let connected = self.db.is_some();
        #[cfg(not(feature = "mongo"))]
        let connected = false;

        if connected { "mongodb" } else { "memory" }
    }
}
