use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Length of a store identifier in its hex form (12-byte ObjectId).
pub const POST_ID_LEN: usize = 24;

/// External, string form of a store-assigned post identifier.
///
/// Construction through [`PostId::parse`] guarantees the value is a
/// well-formed 24 character hexadecimal string, so adapters can convert it
/// to their native identifier type without a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Validate the format of an externally supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.len() == POST_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(DomainError::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
