use std::time::Duration;

#[cfg(feature = "mongo")]
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    error::Error as MongoError,
    options::ClientOptions,
};

/// Maximum connection attempts before giving up.
pub const MAX_CONNECT_ATTEMPTS: u32 = 10;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
}

impl DatabaseConfig {
    /// Read `MONGODB_*` settings through `lookup`. Returns `None` when no
    /// connection URI is configured.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pool_size = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        lookup("MONGODB_URI").map(|uri| Self {
            uri,
            database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "blog".to_string()),
            collection: lookup("MONGODB_COLLECTION").unwrap_or_else(|| "posts".to_string()),
            max_pool_size: pool_size("MONGODB_MAX_POOL_SIZE", 100),
            min_pool_size: pool_size("MONGODB_MIN_POOL_SIZE", 10),
        })
    }
}

/// Next delay in the reconnect schedule: doubles, capped at five seconds.
pub fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_BACKOFF)
}

/// Connection to the document store.
///
/// Holds the driver client (which pools connections internally) and the
/// database handle the post collection lives in.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let repo = MongoPostRepository::new(db.posts());
/// ```
#[cfg(feature = "mongo")]
pub struct DatabaseConnections {
    pub client: Client,
    pub database: Database,
    collection: String,
}

#[cfg(feature = "mongo")]
impl DatabaseConnections {
    /// Connect and verify the server responds, retrying with exponential
    /// backoff.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, MongoError> {
        tracing::info!("Initializing database connection...");

        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 1;
        loop {
            match Self::connect(config).await {
                Ok(conn) => {
                    tracing::info!(
                        database = %config.database,
                        collection = %config.collection,
                        "Database connected (pool: {})",
                        config.max_pool_size
                    );
                    return Ok(conn);
                }
                Err(e) if attempt < MAX_CONNECT_ATTEMPTS => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_attempts = MAX_CONNECT_ATTEMPTS,
                        "Database connection failed, retrying in {}ms",
                        backoff.as_millis()
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = next_backoff(backoff);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn connect(config: &DatabaseConfig) -> Result<Self, MongoError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.app_name = Some("quill".to_string());

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        let conn = Self {
            client,
            database,
            collection: config.collection.clone(),
        };
        conn.ping().await?;
        Ok(conn)
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> Result<(), MongoError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Handle to the post collection.
    pub fn posts(&self) -> Collection<Document> {
        self.database.collection(&self.collection)
    }
}
