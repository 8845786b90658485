use std::path::{Path, PathBuf};

use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::Style;
use serde::Serialize;
use tml_parser::ModInfo;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::{paint, stdout_colored, to_json, Format};

#[derive(Args)]
pub struct InfoArgs {
    /// A single input mod file
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with = "directory",
        required_unless_present = "directory"
    )]
    file: Option<PathBuf>,

    /// A directory of mod files, only files directly inside it are read
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t, env = "TML_FORMAT")]
    format: Format,

    /// Also list mods tagged `@tml-ignore-me`
    #[arg(long, default_value_t = false)]
    include_ignored: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModEntry {
    file: PathBuf,
    #[serde(flatten)]
    info: ModInfo,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let mut files = Vec::new();
        if let Some(file) = &self.file {
            files.push(file.clone());
        }
        if let Some(directory) = &self.directory {
            files.extend(scan_directory(directory)?);
        }

        let entries = load_entries(files, self.include_ignored);

        info!("loaded {} mods", entries.len());

        let output = match self.format {
            Format::Json => to_json(&entries)?,
            Format::Text => {
                let colored = stdout_colored();
                entries.iter().map(|entry| render(entry, colored)).join("\n\n")
            }
        };
        println!("{output}");

        Ok(())
    }
}

/// Loads the info of every file, dropping mods which asked to be hidden unless `include_ignored`.
pub(crate) fn load_entries(files: Vec<PathBuf>, include_ignored: bool) -> Vec<ModEntry> {
    files
        .into_iter()
        .map(|file| ModEntry {
            info: ModInfo::load(&file),
            file,
        })
        .filter(|entry| {
            if entry.info.ignore_me && !include_ignored {
                debug!("skipping ignored mod {}", entry.file.display());
                return false;
            }
            true
        })
        .collect()
}

/// Lists the regular files directly inside a directory, sorted by name.
pub(crate) fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry
            .into_diagnostic()
            .context(format!("scanning {}", directory.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub(crate) fn render(entry: &ModEntry, colored: bool) -> String {
    let info = &entry.info;

    let mut header = format!(
        "{} by {}",
        paint(&info.title, Style::new().bold(), colored),
        info.author
    );
    if !info.version.is_empty() {
        header.push_str(&format!(" (v{})", info.version));
    }

    let mut lines = vec![
        header,
        format!(
            "  {}",
            paint(entry.file.display(), Style::new().dimmed(), colored)
        ),
    ];
    if let Some(game) = &info.recommended_game {
        lines.push(format!("  game: {game}"));
    }
    if let Some(idx) = info.spark_service_index {
        lines.push(format!("  spark service: {idx}"));
    }
    if info.ignore_me {
        lines.push(format!("  {}", paint("ignored", Style::new().yellow(), colored)));
    }
    lines.extend(
        info.description
            .lines()
            .map(|line| format!("  {}", line.trim_end())),
    );

    lines.join("\n")
}
