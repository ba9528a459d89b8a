//! Utility modules shared across the pipeline.

pub mod bytes;
pub mod path;
mod plural;

pub use plural::{plural_count, plural_s};
