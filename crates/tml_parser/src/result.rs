//! The metadata extracted from a single mod file.

use indexmap::IndexMap;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tagged comments start with this sigil, e.g. `@author apple1417`
pub const TAG_SIGIL: char = '@';

/// The result of parsing a mod file
///
/// Description comments are split into BLIMP style tags (`@title My Mod`) and untagged lines. Tag
/// names keep their `@`, and are lowercased, so `@Author` and `@author` land in the same group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseResult {
    /// Values of each tag, in the order they appeared
    pub tagged: IndexMap<String, Vec<String>>,

    /// All untagged description lines, in the order they appeared
    pub untagged: Vec<String>,

    /// The game the mod declares it was made for
    pub game: Option<String>,

    /// Index of the `SparkServiceConfiguration` object the mod's hotfixes are set on
    pub spark_service_index: Option<usize>,
}

impl ParseResult {
    /// Adds a description comment to the relevant collection.
    ///
    /// Empty comments are ignored, as are malformed tags with nothing between the `@` and the
    /// first space.
    pub fn add_comment(&mut self, comment: &str) {
        if comment.is_empty() {
            return;
        }

        if !comment.starts_with(TAG_SIGIL) {
            self.untagged.push(comment.to_owned());
            return;
        }

        let (tag, value) = match comment.find(' ') {
            Some(1) => {
                trace!(comment, "dropping malformed tag");
                return;
            }
            Some(idx) => (&comment[..idx], &comment[idx + 1..]),
            None => (comment, ""),
        };

        self.tagged
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .push(value.to_owned());
    }

    /// Discards all previously added comments, tagged or not.
    pub fn reset(&mut self) {
        self.tagged.clear();
        self.untagged.clear();
    }

    /// Get the values of a tag, by its lowercase name including the `@`
    pub fn tag(&self, name: &str) -> Option<&[String]> {
        self.tagged.get(name).map(Vec::as_slice)
    }

    /// Get the first value given for a tag
    pub fn first_tag_value(&self, name: &str) -> Option<&str> {
        self.tag(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether no description comments were found
    pub fn is_empty(&self) -> bool {
        self.tagged.is_empty() && self.untagged.is_empty()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::ParseResult;

    #[test]
    fn untagged_lines_keep_order() {
        let mut result = ParseResult::default();
        result.add_comment("first");
        result.add_comment("  second  ");
        result.add_comment("third");

        assert_eq!(result.untagged, vec!["first", "  second  ", "third"]);
        assert!(result.tagged.is_empty());
    }

    #[test]
    fn empty_comments_are_dropped() {
        let mut result = ParseResult::default();
        result.add_comment("");

        assert!(result.is_empty());
    }

    #[test]
    fn tags_merge_ignoring_case() {
        let mut result = ParseResult::default();
        result.add_comment("@Author x");
        result.add_comment("@author y");
        result.add_comment("@AUTHOR z w");

        assert_eq!(result.tag("@author"), Some(&["x", "y", "z w"].map(String::from)[..]));
        assert_eq!(result.tagged.len(), 1);
        assert!(result.untagged.is_empty());
    }

    #[test]
    fn tag_without_value_is_recorded_empty() {
        let mut result = ParseResult::default();
        result.add_comment("@tml-ignore-me");

        assert_eq!(result.first_tag_value("@tml-ignore-me"), Some(""));
    }

    #[test]
    fn tag_value_keeps_extra_spaces() {
        let mut result = ParseResult::default();
        result.add_comment("@title  Spaced  Out ");

        assert_eq!(result.first_tag_value("@title"), Some(" Spaced  Out "));
    }

    #[test]
    fn malformed_tag_is_dropped() {
        let mut result = ParseResult::default();
        result.add_comment("@ value");

        assert!(result.is_empty());
    }

    #[test]
    fn lone_sigil_is_an_empty_tag() {
        let mut result = ParseResult::default();
        result.add_comment("@");

        assert_eq!(result.first_tag_value("@"), Some(""));
    }

    #[test]
    fn reset_clears_everything() {
        let mut result = ParseResult::default();
        result.add_comment("@title Old");
        result.add_comment("old line");
        result.spark_service_index = Some(3);

        result.reset();
        result.add_comment("new line");

        assert!(result.tagged.is_empty());
        assert_eq!(result.untagged, vec!["new line"]);
        assert_eq!(result.spark_service_index, Some(3));
    }
}
