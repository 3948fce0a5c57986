//! Seed sources - where the static seed collection is read from.

mod json_file;
mod memory;

pub use json_file::JsonFileSeedSource;
pub use memory::StaticSeedSource;
