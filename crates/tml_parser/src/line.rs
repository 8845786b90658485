//! Extraction for generic mod files, with no recognised header.
//!
//! Descriptions are any `#` comments and free text lines before the first command.

use std::io::BufRead;

use tracing::{debug, instrument};

use crate::command::is_command;
use crate::error::Result;
use crate::result::ParseResult;
use crate::source::LineSource;
use crate::text::trim_start;

/// Parses through a generic mod file line by line.
///
/// Leaves the source positioned on the first command, so that it's the next line read.
#[instrument(skip_all)]
pub fn parse_line_by_line<R: BufRead>(
    source: &mut LineSource<R>,
    result: &mut ParseResult,
) -> Result<()> {
    while let Some(line) = source.next_line()? {
        // No command starts with a '#', so these can go straight into the description
        if let Some(rest) = line.strip_prefix('#') {
            let rest = rest.trim_start_matches('#');
            result.add_comment(rest.strip_prefix(' ').unwrap_or(rest));
            continue;
        }

        if !is_command(trim_start(&line), true) {
            result.add_comment(&line);
            continue;
        }

        debug!(line = source.line_number(), "description ended on command");
        source.push_back(line);
        break;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::parse_line_by_line;
    use crate::error::Result;
    use crate::result::ParseResult;
    use crate::source::LineSource;

    fn run(input: &str) -> Result<(ParseResult, Option<String>)> {
        let mut source = LineSource::new(Cursor::new(input));
        let mut result = ParseResult::default();
        parse_line_by_line(&mut source, &mut result)?;
        Ok((result, source.next_line()?))
    }

    #[test]
    fn strips_hashes_and_one_space() -> Result<()> {
        let (result, next) = run("# Welcome\n## second\n#  indented\n####\nsay Hi\n")?;

        assert_eq!(result.untagged, vec!["Welcome", "second", " indented"]);
        assert_eq!(next.as_deref(), Some("say Hi"));

        Ok(())
    }

    #[test]
    fn free_text_is_kept_untrimmed() -> Result<()> {
        let (result, next) = run("  My Mod  \n\n\tby someone\n  set Foo Bar 1\n")?;

        assert_eq!(result.untagged, vec!["  My Mod  ", "\tby someone"]);
        assert_eq!(next.as_deref(), Some("  set Foo Bar 1"));

        Ok(())
    }

    #[test]
    fn spark_lines_end_the_description() -> Result<()> {
        let (result, next) = run("Hotfixes\nSparkLevelPatchEntry,(1,1,0,),Foo\n")?;

        assert_eq!(result.untagged, vec!["Hotfixes"]);
        assert_eq!(next.as_deref(), Some("SparkLevelPatchEntry,(1,1,0,),Foo"));

        Ok(())
    }

    #[test]
    fn hash_comments_holding_commands_are_comments() -> Result<()> {
        let (result, next) = run("#set Foo Bar 1\n")?;

        assert_eq!(result.untagged, vec!["set Foo Bar 1"]);
        assert_eq!(next, None);

        Ok(())
    }

    #[test]
    fn tags_are_split_out() -> Result<()> {
        let (result, _) = run("# @title Cool Mod\n# @Author Someone\n# plain\n")?;

        assert_eq!(result.first_tag_value("@title"), Some("Cool Mod"));
        assert_eq!(result.first_tag_value("@author"), Some("Someone"));
        assert_eq!(result.untagged, vec!["plain"]);

        Ok(())
    }

    #[test]
    fn command_only_file() -> Result<()> {
        let (result, next) = run("say Hello\n")?;

        assert!(result.is_empty());
        assert_eq!(next.as_deref(), Some("say Hello"));

        Ok(())
    }
}
