//! This library extracts the metadata text mod loaders show for *Borderlands* mod files, without
//! running any of the mod's commands.
//!
//! # Mod File Dialects
//!
//! Mod files are plain text, but come in three layouts, picked based on the first line:
//!
//! | First line       | Dialect                       | Description source                          |
//! |------------------|-------------------------------|---------------------------------------------|
//! | `<BLCMM ...`     | [`Dialect::Blcmm`]            | `<comment>`s at the start of the root category |
//! | `#<...`          | [`Dialect::FilterTool`]       | Free text before the first command/category |
//! | anything else    | [`Dialect::Generic`]          | `#` comments and free text before the first command |
//!
//! In every dialect, the description ends at the first command (`say`, `exec`, `set`, and for
//! generic files anything starting with `spark`). A category with "description" in its name
//! replaces any comments found before it.
//!
//! ## Tags
//!
//! Description lines starting with `@` are [BLIMP] tags, e.g. `@title My Mod`. They're grouped by
//! their lowercased name, including the `@`, separately from the untagged lines. `@ value`, with
//! no name, is dropped.
//!
//! ## Hotfixes
//!
//! After the description, the rest of the file is scanned for hotfix commands setting keys or
//! values on `Transient.SparkServiceConfiguration_<n>`, and the index `n` is recorded.
//!
//! [BLIMP]: https://github.com/apple1417/blcmm-parsing/tree/master/blimp
//!
//! ```
//! # fn doit() -> tml_parser::error::Result<()> {
//! let result = tml_parser::parse_str(concat!(
//!     "# @title My Mod\n",
//!     "# Makes things better.\n",
//!     "set Transient.SparkServiceConfiguration_6 Keys (\"x\")\n",
//! ))?;
//!
//! assert_eq!(result.first_tag_value("@title"), Some("My Mod"));
//! assert_eq!(result.untagged, vec!["Makes things better."]);
//! assert_eq!(result.spark_service_index, Some(6));
//! # Ok(())
//! # }
//! # doit().unwrap();
//! ```

pub mod blcmm;
pub mod command;
pub mod error;
pub mod filtertool;
pub mod format;
pub mod info;
pub mod line;
pub mod result;
pub mod source;
pub mod spark;
pub mod text;

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use bon::Builder;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::source::LineSource;
use crate::spark::scan_spark_service;

pub use format::Dialect;
pub use info::ModInfo;
pub use result::ParseResult;
pub use spark::SparkMatch;

/// Options for how a mod file should be parsed
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct ParseOptions {
    /// Which hotfix line's spark service index to keep
    #[builder(default)]
    pub spark_match: SparkMatch,
}

/// Parses the metadata out of a mod file.
pub fn parse(path: impl AsRef<Path>) -> Result<ParseResult> {
    parse_with(path, &ParseOptions::default())
}

/// Parses the metadata out of a mod file, with the given options.
#[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
pub fn parse_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParseResult> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_owned()));
    }

    let file = File::open(path)?;
    parse_reader_with(BufReader::new(file), options)
}

/// Parses the metadata out of a string holding a mod file's contents.
pub fn parse_str(contents: &str) -> Result<ParseResult> {
    parse_str_with(contents, &ParseOptions::default())
}

/// Parses the metadata out of a string holding a mod file's contents, with the given options.
pub fn parse_str_with(contents: &str, options: &ParseOptions) -> Result<ParseResult> {
    parse_reader_with(Cursor::new(contents), options)
}

/// Parses the metadata out of a reader over a mod file.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseResult> {
    parse_reader_with(reader, &ParseOptions::default())
}

/// Parses the metadata out of a reader over a mod file, with the given options.
#[instrument(skip(reader))]
pub fn parse_reader_with<R: BufRead>(reader: R, options: &ParseOptions) -> Result<ParseResult> {
    let mut source = LineSource::new(reader);
    let mut result = ParseResult::default();

    let dialect = Dialect::sniff(&mut source)?;
    dialect.extract(&mut source, &mut result)?;
    scan_spark_service(&mut source, &mut result, options.spark_match)?;

    Ok(result)
}
