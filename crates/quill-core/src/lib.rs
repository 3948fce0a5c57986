//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate contains the post schema, its validation, and the post and
//! seeding services, with no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError, SeedError};
