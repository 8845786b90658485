//! ASCII-only case-insensitive string handling.
//!
//! Matching only ever folds `A-Z` onto `a-z`, the same as the in-game console. Everything here
//! works on bytes, so non-ASCII text is compared exactly.

use std::fmt;

/// Matches the C locale's `isspace`, which unlike [`char::is_ascii_whitespace`] includes `\x0B`.
pub fn is_space(chr: char) -> bool {
    chr.is_ascii_whitespace() || chr == '\x0B'
}

pub fn trim_start(value: &str) -> &str {
    value.trim_start_matches(is_space)
}

pub fn trim(value: &str) -> &str {
    value.trim_matches(is_space)
}

/// A borrowed string which compares and searches ignoring ASCII case.
#[derive(Clone, Copy, Default)]
pub struct CiStr<'a>(&'a str);

impl<'a> CiStr<'a> {
    pub const fn new(value: &'a str) -> Self {
        CiStr(value)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0
            .as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }

    /// Byte offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.find_from(needle, 0)
    }

    /// Byte offset of the first occurrence of `needle` starting at or after `start`.
    ///
    /// A `start` past the end of the string never matches.
    pub fn find_from(&self, needle: &str, start: usize) -> Option<usize> {
        let haystack = self.0.as_bytes();
        let needle = needle.as_bytes();
        if start > haystack.len() {
            return None;
        }
        if needle.is_empty() {
            return Some(start);
        }

        haystack[start..]
            .windows(needle.len())
            .position(|window| window.eq_ignore_ascii_case(needle))
            .map(|offset| start + offset)
    }
}

impl PartialEq for CiStr<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(other.0)
    }
}

impl Eq for CiStr<'_> {}

impl PartialEq<str> for CiStr<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for CiStr<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Debug for CiStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CiStr({:?})", self.0)
    }
}
