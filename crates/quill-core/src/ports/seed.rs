use async_trait::async_trait;
use serde_json::Value;

use crate::error::SeedError;

/// Source of the static seed collection.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Load every seed entry. Entries are untrusted JSON values.
    async fn load(&self) -> Result<Vec<Value>, SeedError>;

    /// Where the entries come from, for log messages.
    fn describe(&self) -> String;
}
