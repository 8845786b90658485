//! Extraction for FilterTool mod files.
//!
//! FilterTool files start with a root category header, `#<My Mod>`, and then lay out nested
//! categories using more `#<Name>` / `#</Name>` header lines. The description is the free text
//! before the first command or nested category. If the first nested category is named something
//! like "Description", its contents replace anything seen before it.

use std::io::BufRead;

use tracing::{debug, instrument};

use crate::command::is_command;
use crate::error::Result;
use crate::result::ParseResult;
use crate::source::LineSource;
use crate::text::{trim, CiStr};

/// Gets the name out of a `#<name>` category header line, if it is one.
fn category_name(trimmed: &str) -> Option<&str> {
    trimmed.strip_prefix("#<")?.strip_suffix('>')
}

/// Parses through a FilterTool mod file.
///
/// Leaves the source positioned on the first command or non-description category header.
#[instrument(skip_all)]
pub fn parse_filtertool<R: BufRead>(
    source: &mut LineSource<R>,
    result: &mut ParseResult,
) -> Result<()> {
    // Root category header, holds nothing of interest
    let _ = source.next_line()?;

    let mut started_description_category = false;
    while let Some(line) = source.next_line()? {
        let trimmed = trim(&line);

        if let Some(name) = category_name(trimmed) {
            if !started_description_category && CiStr::new(name).contains("description") {
                debug!(category = name, "found dedicated description category");
                result.reset();
                started_description_category = true;
                continue;
            }
        } else if !is_command(trimmed, false) {
            result.add_comment(&line);
            continue;
        }

        debug!(line = source.line_number(), "description ended");
        source.push_back(line);
        break;
    }

    Ok(())
}
