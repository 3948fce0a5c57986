//! Middleware modules.

pub mod error;
mod request_id;

pub use request_id::RequestIdMiddleware;
