//! Working out which kind of mod file is being parsed.

use std::fmt;
use std::io::BufRead;

use tracing::debug;

use crate::blcmm::parse_blcmm;
use crate::error::Result;
use crate::filtertool::parse_filtertool;
use crate::line::parse_line_by_line;
use crate::result::ParseResult;
use crate::source::LineSource;

/// The supported mod file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Files saved by BLCMM, starting with `<BLCMM`
    Blcmm,
    /// Files saved by FilterTool, starting with a `#<Root>` category header
    FilterTool,
    /// Anything else, e.g. hand written or BL3 hotfix files
    Generic,
}

impl Dialect {
    /// Picks a dialect based on the first line of a file.
    pub fn detect(first_line: &str) -> Self {
        if first_line.starts_with("<BLCMM") {
            Dialect::Blcmm
        } else if first_line.starts_with("#<") {
            Dialect::FilterTool
        } else {
            Dialect::Generic
        }
    }

    /// Peeks at the first line of the source to pick a dialect, without consuming it.
    pub fn sniff<R: BufRead>(source: &mut LineSource<R>) -> Result<Self> {
        let dialect = Self::detect(source.peek_line()?.unwrap_or_default());
        debug!(%dialect, "detected mod file dialect");
        Ok(dialect)
    }

    /// Runs this dialect's description extractor over the source.
    ///
    /// The source is left on the first line which isn't part of the description.
    pub fn extract<R: BufRead>(
        &self,
        source: &mut LineSource<R>,
        result: &mut ParseResult,
    ) -> Result<()> {
        match self {
            Dialect::Blcmm => parse_blcmm(source, result),
            Dialect::FilterTool => parse_filtertool(source, result),
            Dialect::Generic => parse_line_by_line(source, result),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Blcmm => "BLCMM",
            Dialect::FilterTool => "FilterTool",
            Dialect::Generic => "generic",
        })
    }
}
