pub mod blimp;
pub mod info;
pub mod parse;

use std::fmt::Display;
use std::io::IsTerminal;

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

/// How results get written to stdout
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable, colored when printing to a terminal
    #[default]
    Text,
    /// Pretty printed JSON
    Json,
}

/// Only color output written straight to a terminal, and respect `NO_COLOR`
pub(crate) fn stdout_colored() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub(crate) fn paint(text: impl Display, style: Style, colored: bool) -> String {
    if colored {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).into_diagnostic()
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print everything extracted from a mod file
    Parse(parse::ParseArgs),
    /// Print the info a mod manager would show for mod files
    Info(info::InfoArgs),
    /// Read a mod from stdin and print its tags as JSON
    Blimp(blimp::BlimpArgs),
}

impl Commands {
    pub fn handle(&self) -> Result<()> {
        match self {
            Commands::Parse(parse) => parse.handle(),
            Commands::Info(info) => info.handle(),
            Commands::Blimp(blimp) => blimp.handle(),
        }
    }
}
