//! Turning a [`ParseResult`] into what a mod manager would display.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::result::ParseResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Author shown for mods which don't credit anyone
pub const DEFAULT_AUTHOR: &str = "Text Mod Loader";

/// Characters stripped off description lines, even when no edges are found
const WHITESPACE: &str = " \t\n\r\x0B\x0C";

/// Share of an edge which must be symbols before it's treated as decoration
const EDGE_THRESHOLD: f64 = 0.8;

/// Display metadata for a single mod file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModInfo {
    pub title: String,
    pub author: String,
    pub version: String,
    pub description: String,
    /// Set by an `@tml-ignore-me` tag, the mod should be hidden
    pub ignore_me: bool,
    pub spark_service_index: Option<usize>,
    pub recommended_game: Option<String>,
}

impl ModInfo {
    /// The info used when a file couldn't be parsed.
    pub fn fallback(file_name: &str) -> Self {
        ModInfo {
            title: file_name.to_owned(),
            author: DEFAULT_AUTHOR.to_owned(),
            version: String::new(),
            description: String::new(),
            ignore_me: false,
            spark_service_index: None,
            recommended_game: None,
        }
    }

    /// Builds the display info from a parse result.
    ///
    /// `file_name` is used as the title if the mod doesn't have a `@title` tag.
    pub fn from_result(result: &ParseResult, file_name: &str) -> Self {
        let mut authors = Vec::new();
        if let Some(main_author) = result.first_tag_value("@main-author") {
            authors.push(main_author.to_owned());
        }
        if let Some(author_list) = result.tag("@author") {
            authors.extend(author_list.iter().map(|author| author.trim().to_owned()));
        }

        let description = match result.tag("@description") {
            Some(lines) => join_lines_markdown_like(lines),
            None => {
                // No explicit description tags, use the untagged lines instead
                let edges = find_edge_characters(&result.untagged);
                let stripped = result
                    .untagged
                    .iter()
                    .map(|line| line.trim_matches(|chr: char| edges.contains(chr)))
                    .collect::<Vec<_>>();
                join_lines_markdown_like(&stripped)
            }
        };

        ModInfo {
            title: result
                .first_tag_value("@title")
                .unwrap_or(file_name)
                .to_owned(),
            author: if authors.is_empty() {
                DEFAULT_AUTHOR.to_owned()
            } else {
                join_sentence(&authors, "and")
            },
            version: result
                .first_tag_value("@version")
                .unwrap_or_default()
                .to_owned(),
            description,
            ignore_me: result.tag("@tml-ignore-me").is_some(),
            spark_service_index: result.spark_service_index,
            recommended_game: result.game.clone(),
        }
    }

    /// Loads the display info for a mod file.
    ///
    /// This never fails, if the file can't be parsed a warning is logged and the fallback info
    /// is returned instead.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match crate::parse(path) {
            Ok(result) => ModInfo::from_result(&result, &file_name),
            Err(err) => {
                warn!("failed to extract mod metadata for file '{file_name}'");
                debug!(error = %err, "metadata extraction error");
                ModInfo::fallback(&file_name)
            }
        }
    }
}

/// Joins lines similarly to how markdown does it.
///
/// Adjacent lines get space separated, an entirely blank line is needed to add a newline.
pub fn join_lines_markdown_like<S: AsRef<str>>(lines: &[S]) -> String {
    let mut output = String::new();
    let mut no_space = true;

    for line in lines {
        let stripped = line.as_ref().trim();
        if stripped.is_empty() {
            if !no_space {
                output.push('\n');
            }
            no_space = true;
            continue;
        }

        if !no_space {
            output.push(' ');
        }
        output.push_str(stripped);
        no_space = false;
    }

    output
}

/// Joins a list of strings as in a sentence listing them.
///
/// e.g. `["Alice", "Bob", "Carl"]` -> `"Alice, Bob, and Carl"`
pub fn join_sentence<S: AsRef<str>>(entries: &[S], final_connector: &str) -> String {
    let Some((last, rest)) = entries.split_last() else {
        return String::new();
    };

    let mut output = String::new();
    for entry in rest {
        output.push_str(entry.as_ref());
        output.push_str(", ");
    }
    if entries.len() > 2 {
        output.push_str(final_connector);
        output.push(' ');
    }
    output.push_str(last.as_ref());
    output
}

/// Tries to detect characters used to draw ASCII art borders around a block of lines.
///
/// The result always includes whitespace, so it can be used to trim every line directly.
pub fn find_edge_characters<S: AsRef<str>>(lines: &[S]) -> String {
    let mut strip_chars = WHITESPACE.to_owned();

    let stripped = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    let (Some(first), Some(last)) = (stripped.first(), stripped.last()) else {
        return strip_chars;
    };

    let edges = [
        first.to_string(),
        last.to_string(),
        stripped.iter().filter_map(|line| line.chars().next()).collect(),
        stripped
            .iter()
            .filter_map(|line| line.chars().next_back())
            .collect(),
    ];

    let mut seen = strip_chars.chars().collect::<HashSet<_>>();
    for edge in edges {
        let threshold = EDGE_THRESHOLD * edge.chars().count() as f64;
        let symbols = edge
            .chars()
            .filter(|chr| !chr.is_alphanumeric())
            .collect::<Vec<_>>();

        if symbols.len() as f64 > threshold {
            for symbol in symbols {
                if seen.insert(symbol) {
                    strip_chars.push(symbol);
                }
            }
        }
    }

    strip_chars
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{
        find_edge_characters, join_lines_markdown_like, join_sentence, ModInfo, DEFAULT_AUTHOR,
    };
    use crate::result::ParseResult;

    #[test]
    fn markdown_joining() {
        assert_eq!(
            join_lines_markdown_like(&["", "  one", "two  ", "", "", "three", ""]),
            "one two\nthree\n"
        );
        assert_eq!(join_lines_markdown_like::<&str>(&[]), "");
    }

    #[test]
    fn sentence_joining() {
        assert_eq!(join_sentence::<&str>(&[], "and"), "");
        assert_eq!(join_sentence(&["Alice"], "and"), "Alice");
        assert_eq!(join_sentence(&["Alice", "Bob"], "and"), "Alice, Bob");
        assert_eq!(
            join_sentence(&["Alice", "Bob", "Carl"], "or"),
            "Alice, Bob, or Carl"
        );
    }

    #[test]
    fn edge_detection() {
        let lines = ["/========\\", "| Hello  |", "| World  |", "\\========/"];
        let edges = find_edge_characters(&lines);

        for chr in ['=', '/', '\\', '|', ' ', '\t'] {
            assert!(edges.contains(chr), "missing {chr:?}");
        }
        assert!(!edges.contains('H'));

        let plain = find_edge_characters(&["Just some", "text here"]);
        assert!(!plain.contains('='));
    }

    #[test]
    fn info_from_tags() {
        let mut result = ParseResult::default();
        for comment in [
            "@title Better Guns",
            "@main-author Alice",
            "@author  Bob ",
            "@author Carl",
            "@version 1.2",
            "@description First line",
            "@description second line",
            "untagged is ignored",
        ] {
            result.add_comment(comment);
        }
        result.spark_service_index = Some(6);
        result.game = Some("BL2".into());

        assert_eq!(
            ModInfo::from_result(&result, "guns.blcm"),
            ModInfo {
                title: "Better Guns".into(),
                author: "Alice, Bob, and Carl".into(),
                version: "1.2".into(),
                description: "First line second line".into(),
                ignore_me: false,
                spark_service_index: Some(6),
                recommended_game: Some("BL2".into()),
            }
        );
    }

    #[test]
    fn info_from_untagged_lines() {
        let mut result = ParseResult::default();
        for comment in ["#####################", "# My Mod", "#", "# Does stuff", "#####################"] {
            result.add_comment(comment);
        }
        result.add_comment("@tml-ignore-me");

        let info = ModInfo::from_result(&result, "my_mod.txt");

        assert_eq!(info.title, "my_mod.txt");
        assert_eq!(info.author, DEFAULT_AUTHOR);
        assert_eq!(info.version, "");
        assert_eq!(info.description, "My Mod\nDoes stuff\n");
        assert!(info.ignore_me);
    }

    #[test]
    fn missing_file_falls_back() {
        let info = ModInfo::load("/definitely/not/a/real/mod.txt");

        assert_eq!(info, ModInfo::fallback("mod.txt"));
    }
}
