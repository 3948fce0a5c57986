//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the document store and seed file integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongo` - MongoDB post storage

pub mod database;
pub mod seed;

// Re-exports - In-Memory
pub use database::InMemoryPostRepository;
pub use seed::{JsonFileSeedSource, StaticSeedSource};

// Re-exports - MongoDB
#[cfg(feature = "mongo")]
pub use database::{DatabaseConnections, MongoPostRepository};
