//! Asset reference extraction from `script` / `link` tags.
//!
//! Values are located textually (`src="` / `href="`) in the raw tag bytes and
//! returned verbatim, without unescaping or path normalization. A value must be
//! UTF-8 to become a path; the rest of the markup may be in any encoding.

use memchr::{memchr, memmem};
use thiserror::Error;

use super::scan::Tag;

/// Which kind of asset a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `<script src="...">`, must mention `.js`.
    Script,
    /// `<link href="...">`, must mention `.css`.
    Style,
}

impl ReferenceKind {
    /// Attribute name holding the reference.
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Script => "src",
            Self::Style => "href",
        }
    }

    /// Literal marker that starts the attribute value.
    const fn marker(self) -> &'static [u8] {
        match self {
            Self::Script => b"src=\"",
            Self::Style => b"href=\"",
        }
    }

    /// Extension the value must contain.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Script => ".js",
            Self::Style => ".css",
        }
    }
}

/// Why a tag produced no usable reference. Every variant is a skip, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{} is empty", .0.attribute())]
    Empty(ReferenceKind),

    #[error("{} is remote", .0.attribute())]
    Remote(ReferenceKind),

    #[error("{} is not valid utf-8", .0.attribute())]
    NotUtf8(ReferenceKind),

    #[error("{} is not a {} file", .0.attribute(), .0.extension())]
    WrongExtension(ReferenceKind),
}

/// An asset path found in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub kind: ReferenceKind,
    /// Path as written, may contain `./` or `../`.
    pub path: &'a str,
    /// Full bytes of the owning tag.
    pub tag: &'a [u8],
}

/// Extract the `src` value of a `<script>` tag.
pub fn extract_script_src(tag: &[u8]) -> Result<&str, ExtractError> {
    extract(tag, ReferenceKind::Script)
}

/// Extract the `href` value of a `<link>` tag.
pub fn extract_link_href(tag: &[u8]) -> Result<&str, ExtractError> {
    extract(tag, ReferenceKind::Style)
}

/// Extract a reference from a scanned tag.
///
/// Returns `None` for tags that are neither `script` nor `link`.
pub fn extract_reference<'a>(tag: &Tag<'a>) -> Option<Result<Reference<'a>, ExtractError>> {
    let (kind, value) = if tag.is_script() {
        (ReferenceKind::Script, extract_script_src(tag.raw))
    } else if tag.is_link() {
        (ReferenceKind::Style, extract_link_href(tag.raw))
    } else {
        return None;
    };

    Some(value.map(|path| Reference {
        kind,
        path,
        tag: tag.raw,
    }))
}

/// Remote references start with `http` (case-sensitive).
#[inline]
pub fn is_remote(path: &str) -> bool {
    path.starts_with("http")
}

fn extract(tag: &[u8], kind: ReferenceKind) -> Result<&str, ExtractError> {
    let value = quoted_value(tag, kind.marker()).ok_or(ExtractError::Empty(kind))?;
    if value.is_empty() {
        return Err(ExtractError::Empty(kind));
    }
    let value = std::str::from_utf8(value).map_err(|_| ExtractError::NotUtf8(kind))?;
    if is_remote(value) {
        return Err(ExtractError::Remote(kind));
    }
    if !value.contains(kind.extension()) {
        return Err(ExtractError::WrongExtension(kind));
    }
    Ok(value)
}

/// Bytes between `marker` and the next `"`, if both exist.
fn quoted_value<'a>(tag: &'a [u8], marker: &[u8]) -> Option<&'a [u8]> {
    let start = memmem::find(tag, marker)? + marker.len();
    let len = memchr(b'"', &tag[start..])?;
    Some(&tag[start..start + len])
}
