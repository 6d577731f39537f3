use clap::Args;
use pemkit_codec::{decode, encode};
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::{read_input, write_stdout};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM file. If not specified, reads from stdin
    file: Option<String>,

    /// Write the public half of a private key
    #[arg(long)]
    public: bool,
}

/// Re-encodes the first PEM block in its canonical form: PKCS#8 for private
/// keys, SubjectPublicKeyInfo for public keys.
pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let value = decode(&input)?;
    debug!(variant = %value.variant(), "decoded input");

    let value = match (config.public, value.is_private()) {
        (true, true) => value
            .public_key()
            .ok_or_else(|| Error::PublicKeyExtraction(value.variant().to_string()))?,
        (true, false) if value.as_certificate().is_some() => {
            return Err(Error::PublicKeyExtraction(value.variant().to_string()));
        }
        _ => value,
    };

    write_stdout(&encode(&value)?)
}
