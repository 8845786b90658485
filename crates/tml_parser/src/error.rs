//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// The input path did not exist when parsing started
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// The BLCMM markup could not be turned into a well formed document
    #[error("{0}")]
    #[diagnostic(help("the file is not valid BLCMM markup"))]
    PreprocessError(String),

    /// The BLCMM document parsed, but isn't laid out as expected
    #[error("{0}")]
    DocumentMalformed(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
