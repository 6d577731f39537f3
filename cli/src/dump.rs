use clap::Args;

use crate::error::Result;
use crate::utils::{first_block, format_hex_dump, read_input, write_stdout};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM file. If not specified, reads from stdin
    file: Option<String>,

    /// Print a hex dump instead of raw DER bytes
    #[arg(long)]
    hex: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let (_, der) = first_block(&input)?;

    if config.hex {
        print!("{}", format_hex_dump(&der));
        return Ok(());
    }
    write_stdout(&der)
}
