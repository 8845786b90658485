use std::io::{self, Read};

use clap::Args;
use miette::{Context, IntoDiagnostic, Result};

/// Runs the parser over stdin, for use with the BLIMP tag test suite
#[derive(Args)]
pub struct BlimpArgs {}

impl BlimpArgs {
    pub fn handle(&self) -> Result<()> {
        let mut contents = Vec::new();
        io::stdin()
            .read_to_end(&mut contents)
            .into_diagnostic()
            .context("reading stdin")?;

        let result = tml_parser::parse_reader(contents.as_slice())?;
        println!(
            "{}",
            serde_json::to_string(&result.tagged).into_diagnostic()?
        );

        Ok(())
    }
}
