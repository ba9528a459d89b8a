//! Content-derived asset names.
//!
//! A cache-bust marker is `cc` followed by the unsigned decimal CRC-32/IEEE
//! of the file bytes, embedded as the last dash-segment of the stem:
//!
//! ```text
//! cool.js            -> cool-cc1234567.js
//! cool-cc1234567.js  -> cool-cc7654321.js   (content changed)
//! cool-cc1234567.js  -> cool-cc1234567.js   (content unchanged)
//! ```
//!
//! Any trailing dash-segment that starts with `cc` and is at least three
//! characters long counts as a previous marker, so `lib-ccmath.js` is
//! treated as already marked and its `ccmath` segment gets replaced. A stem
//! without a dash is its own trailing segment: `ccfoo.js` becomes `cc<crc>.js`.

/// Prefix of every cache-bust marker.
pub const MARKER_PREFIX: &str = "cc";

/// Compute the marker for `bytes`. Depends on nothing but the content.
#[inline]
pub fn content_marker(bytes: &[u8]) -> String {
    format!("{MARKER_PREFIX}{}", crc32fast::hash(bytes))
}

/// Whether a dash-segment looks like a previous marker (`cc` + at least one char).
#[inline]
pub fn is_marker(segment: &str) -> bool {
    segment.len() > MARKER_PREFIX.len() && segment.starts_with(MARKER_PREFIX)
}

/// Compute the new bare file name for an asset with content `bytes`
/// currently named `file_name`.
///
/// Replaces a previous marker in place, otherwise appends `-<marker>`
/// before the extension.
pub fn compute_renamed_name(bytes: &[u8], file_name: &str) -> String {
    let marker = content_marker(bytes);
    let (stem, ext) = split_extension(file_name);

    // everything up to and including the last dash stays
    let keep = stem.rfind('-').map_or(0, |dash| dash + 1);
    if is_marker(&stem[keep..]) {
        return format!("{}{marker}{ext}", &stem[..keep]);
    }
    format!("{stem}-{marker}{ext}")
}

/// Split `name` into stem and extension (with its dot). Dotfiles have no extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}
