//! Application services - compose validation and ports into operations.

mod posts;
mod seed;

pub use posts::{PostService, decode_slug};
pub use seed::{SEED_ID_FIELD, SeedImporter, SeedReport};
