//! Markup scanning: tags and the asset references they carry.

mod reference;
mod scan;

pub use reference::{Reference, extract_reference};
pub use scan::scan_tags;
