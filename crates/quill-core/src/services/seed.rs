//! One-shot import of the static seed collection.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::domain::BlogPost;
use crate::error::DomainError;
use crate::ports::{PostRepository, SeedSource};

/// Field carried by seed entries that is discarded on import.
pub const SEED_ID_FIELD: &str = "id";

/// Counts reported after an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeedReport {
    pub inserted: u64,
    pub failed: u64,
}

/// Seeds an empty post collection from a [`SeedSource`].
///
/// The emptiness check and the inserts are separate store calls, so two
/// concurrent runs can both see an empty collection and both insert.
pub struct SeedImporter {
    repo: Arc<dyn PostRepository>,
    source: Arc<dyn SeedSource>,
}

impl SeedImporter {
    pub fn new(repo: Arc<dyn PostRepository>, source: Arc<dyn SeedSource>) -> Self {
        Self { repo, source }
    }

    /// Run the import.
    ///
    /// Returns [`DomainError::Conflict`] without reading the source when the
    /// collection already holds records. Individual entry failures are
    /// counted and never abort the run.
    pub async fn run(&self) -> Result<SeedReport, DomainError> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            tracing::warn!(existing, "Seed skipped: collection is not empty");
            return Err(DomainError::Conflict(
                "Migration has already been run. The posts collection is not empty.".to_string(),
            ));
        }

        let entries = self.source.load().await?;
        tracing::info!(
            source = %self.source.describe(),
            entries = entries.len(),
            "Seeding posts"
        );

        let mut report = SeedReport::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match self.import_entry(entry).await {
                Ok(()) => report.inserted += 1,
                Err(reason) => {
                    tracing::error!(index, error = %reason, "Failed to import seed entry");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            inserted = report.inserted,
            failed = report.failed,
            "Seeding finished"
        );
        Ok(report)
    }

    async fn import_entry(&self, mut entry: Value) -> Result<(), DomainError> {
        if let Some(object) = entry.as_object_mut() {
            object.remove(SEED_ID_FIELD);
        }
        let post = BlogPost::validate(&entry)?;
        self.repo.insert(post).await?;
        Ok(())
    }
}
