//! Byte-slice helpers for markup that is not guaranteed to be UTF-8.

use memchr::memmem;

/// Replace every non-overlapping occurrence of `needle` in `haystack`.
///
/// An empty `needle` leaves the input unchanged.
pub fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for idx in memmem::find_iter(haystack, needle) {
        out.extend_from_slice(&haystack[last..idx]);
        out.extend_from_slice(replacement);
        last = idx + needle.len();
    }
    out.extend_from_slice(&haystack[last..]);
    out
}

/// Whether `needle` occurs in `haystack`.
#[inline]
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    memmem::find(haystack, needle).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all() {
        assert_eq!(replace_all(b"a.js a.js", b"a.js", b"a-cc1.js"), b"a-cc1.js a-cc1.js");
        assert_eq!(replace_all(b"aaa", b"aa", b"b"), b"ba");
        assert_eq!(replace_all(b"none", b"x", b"y"), b"none");
        assert_eq!(replace_all(b"keep", b"", b"y"), b"keep");
    }

    #[test]
    fn test_replace_all_keeps_invalid_utf8() {
        let input = b"caf\xe9 <script src=\"a.js\">";
        let out = replace_all(input, b"a.js", b"a-cc1.js");
        assert_eq!(out, b"caf\xe9 <script src=\"a-cc1.js\">");
        assert!(contains(&out, b"\xe9"));
    }
}
