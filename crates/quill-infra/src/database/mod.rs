//! Post storage - MongoDB and in-memory repositories.

mod connections;
mod memory;

#[cfg(feature = "mongo")]
pub mod mongo_repo;

pub use connections::{DatabaseConfig, MAX_CONNECT_ATTEMPTS, next_backoff};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongo")]
pub use connections::DatabaseConnections;
#[cfg(feature = "mongo")]
pub use mongo_repo::MongoPostRepository;
