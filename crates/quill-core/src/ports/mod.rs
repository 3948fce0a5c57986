//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod seed;

pub use repository::PostRepository;
pub use seed::SeedSource;
