use async_trait::async_trait;
use serde_json::Value;

use quill_core::error::SeedError;
use quill_core::ports::SeedSource;

/// Seed source over a fixed, in-memory list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    entries: Vec<Value>,
}

impl StaticSeedSource {
    pub fn new(entries: Vec<Value>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn load(&self) -> Result<Vec<Value>, SeedError> {
        Ok(self.entries.clone())
    }

    fn describe(&self) -> String {
        format!("{} static entries", self.entries.len())
    }
}
