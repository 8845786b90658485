use std::path::PathBuf;

use clap::Args;
use miette::{Context, Result};
use owo_colors::Style;
use tml_parser::{ParseOptions, ParseResult, SparkMatch};
use tracing::info;

use super::{paint, stdout_colored, to_json, Format};

#[derive(Args)]
pub struct ParseArgs {
    /// An input mod file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t, env = "TML_FORMAT")]
    format: Format,

    /// Keep the spark service index of the first hotfix block, instead of the last
    #[arg(long, default_value_t = false)]
    first_spark_match: bool,
}

impl ParseArgs {
    pub fn handle(&self) -> Result<()> {
        let options = ParseOptions::builder()
            .spark_match(if self.first_spark_match {
                SparkMatch::First
            } else {
                SparkMatch::Last
            })
            .build();

        info!("parsing {}", self.file.display());
        let result = tml_parser::parse_with(&self.file, &options)
            .context(format!("path: {}", self.file.display()))?;

        let output = match self.format {
            Format::Json => to_json(&result)?,
            Format::Text => render(&result, stdout_colored()),
        };
        println!("{output}");

        Ok(())
    }
}

pub(crate) fn render(result: &ParseResult, colored: bool) -> String {
    let mut lines = Vec::new();

    for (tag, values) in &result.tagged {
        for value in values {
            lines.push(format!("{} {value}", paint(tag, Style::new().cyan(), colored)));
        }
    }
    lines.extend(result.untagged.iter().cloned());

    let game = result.game.as_deref().unwrap_or("-");
    lines.push(format!("{} {game}", paint("game:", Style::new().bold(), colored)));

    let spark = result
        .spark_service_index
        .map_or_else(|| "-".to_owned(), |idx| idx.to_string());
    lines.push(format!(
        "{} {spark}",
        paint("spark service:", Style::new().bold(), colored)
    ));

    lines.join("\n")
}
