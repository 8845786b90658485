//! Finding which spark service a mod's hotfixes are set on.
//!
//! Offline hotfix files set their hotfixes on a `Transient.SparkServiceConfiguration_<n>` object,
//! roughly matching the regex:
//!
//! ```text
//! /set\s+Transient.SparkServiceConfiguration_(\d+)\s+(Keys|Values)/i
//! ```
//!
//! This scan runs over whatever the description extractor left in the source, which always
//! includes the line it stopped on.

use std::io::BufRead;

use tracing::{debug, instrument};
use winnow::ascii::digit1;
use winnow::prelude::*;
use winnow::ModalResult;

use crate::error::Result;
use crate::result::ParseResult;
use crate::source::LineSource;
use crate::text::CiStr;

const SET: &str = "set";
const MARKER: &str = "Transient.SparkServiceConfiguration_";
const SUFFIXES: [&str; 2] = ["Keys", "Values"];

/// Which match to keep when a file holds more than one hotfix block
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SparkMatch {
    /// Stop scanning at the first matching line
    First,
    /// Scan the whole file, the last matching line wins
    #[default]
    Last,
}

fn spark_index(input: &mut &str) -> ModalResult<usize> {
    digit1.parse_to().parse_next(input)
}

/// Gets the spark service index out of a line setting hotfix keys or values.
pub fn match_line(line: &str) -> Option<usize> {
    let line_ci = CiStr::new(line);

    let set_offset = line_ci.find(SET)?;
    // Need at least some whitespace between the two
    let marker_offset = line_ci.find_from(MARKER, set_offset + SET.len() + 1)?;

    let mut rest = &line[marker_offset + MARKER.len()..];
    let index = spark_index.parse_next(&mut rest).ok()?;

    let rest = CiStr::new(rest);
    SUFFIXES
        .iter()
        .any(|suffix| rest.contains(suffix))
        .then_some(index)
}

/// Scans through the rest of the source looking for hotfix commands.
#[instrument(skip(source, result))]
pub fn scan_spark_service<R: BufRead>(
    source: &mut LineSource<R>,
    result: &mut ParseResult,
    policy: SparkMatch,
) -> Result<()> {
    while let Some(line) = source.next_line()? {
        let Some(index) = match_line(&line) else {
            continue;
        };

        debug!(index, line = source.line_number(), "found spark service");
        result.spark_service_index = Some(index);

        if policy == SparkMatch::First {
            break;
        }
    }

    Ok(())
}
