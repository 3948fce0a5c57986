//! Seed CLI tool - imports the static seed file into an empty collection.
//!
//! Usage: `migrate [SEED_FILE]`. The seed path defaults to the `SEED_FILE`
//! environment variable, then `data/blogs.json`.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use quill_core::services::SeedImporter;
use quill_infra::database::DatabaseConfig;
use quill_infra::{DatabaseConnections, JsonFileSeedSource, MongoPostRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = DatabaseConfig::from_lookup(|key| env::var(key).ok())
        .context("MONGODB_URI must be set to seed a database")?;
    let seed_file = env::args()
        .nth(1)
        .or_else(|| env::var("SEED_FILE").ok())
        .unwrap_or_else(|| "data/blogs.json".to_string());

    let db = DatabaseConnections::init(&config)
        .await
        .context("failed to connect to database")?;
    let repo = Arc::new(MongoPostRepository::new(db.posts()));
    let source = Arc::new(JsonFileSeedSource::new(&seed_file));

    let report = SeedImporter::new(repo, source)
        .run()
        .await
        .with_context(|| format!("seeding from {seed_file} failed"))?;

    tracing::info!(
        inserted = report.inserted,
        failed = report.failed,
        "Migration completed"
    );
    Ok(())
}
