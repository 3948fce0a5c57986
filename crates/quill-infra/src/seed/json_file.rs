use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use quill_core::error::SeedError;
use quill_core::ports::SeedSource;

/// Seed source reading a JSON array from a file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSeedSource {
    path: PathBuf,
}

impl JsonFileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse seed file contents. The top level must be an array; entries are
/// returned untouched.
pub fn parse_seed(contents: &str) -> Result<Vec<Value>, SeedError> {
    serde_json::from_str::<Vec<Value>>(contents).map_err(|e| SeedError::Malformed(e.to_string()))
}

#[async_trait]
impl SeedSource for JsonFileSeedSource {
    async fn load(&self) -> Result<Vec<Value>, SeedError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SeedError::Missing(self.path.display().to_string()),
                _ => SeedError::Unreadable(format!("{}: {}", self.path.display(), e)),
            })?;
        parse_seed(&contents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
