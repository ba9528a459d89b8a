//! Lightweight tag scanner.
//!
//! Splits markup into `<...>` fragments in a single left-to-right pass
//! without building a tree. Works on raw bytes, so markup in any
//! ASCII-compatible encoding scans the same way. This is not an HTML parser:
//!
//! - every `>` closes the open tag, even inside a quoted attribute value
//! - a `<` while a tag is open restarts the tag at the new position
//! - a trailing `<` with no closing `>` yields nothing
//! - a `>` with no open tag is ignored
//!
//! The tag type is the run after `<` up to the first space or the closing `>`.

/// A single `<...>` fragment found in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag type token, e.g. `script`, `link`, `/script`, `!DOCTYPE`.
    pub kind: &'a [u8],
    /// Full tag bytes including the angle brackets.
    pub raw: &'a [u8],
    /// Byte offset of the opening `<`.
    pub start: usize,
}

impl Tag<'_> {
    #[inline]
    pub fn is_script(&self) -> bool {
        self.kind == b"script"
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        self.kind == b"link"
    }
}

/// Iterator over the tags of a markup document.
///
/// A clone continues from the same position. Call [`scan_tags`] again to
/// rescan from the beginning.
#[derive(Debug, Clone)]
pub struct Tags<'a> {
    src: &'a [u8],
    pos: usize,
}

/// Scan `src` for tags.
///
/// # Example
/// ```ignore
/// let kinds: Vec<_> = scan_tags(b"<p>hi</p>").map(|t| t.kind).collect();
/// assert_eq!(kinds, [b"p".as_slice(), b"/p"]);
/// ```
#[inline]
pub fn scan_tags(src: &[u8]) -> Tags<'_> {
    Tags { src, pos: 0 }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let mut open: Option<usize> = None;
        let mut kind_end: Option<usize> = None;

        while self.pos < src.len() {
            let i = self.pos;
            self.pos += 1;

            match src[i] {
                b'<' => {
                    open = Some(i);
                    kind_end = None;
                }
                b'>' => {
                    if let Some(start) = open {
                        let end = kind_end.unwrap_or(i);
                        return Some(Tag {
                            kind: &src[start + 1..end],
                            raw: &src[start..=i],
                            start,
                        });
                    }
                }
                b' ' if open.is_some() && kind_end.is_none() => kind_end = Some(i),
                _ => {}
            }
        }
        None
    }
}
