use clap::Args;
use pemkit_codec::{PemValue, encode};
use rand_core::OsRng;
use tracing::info;
use x509_cert::der::Decode;

use crate::error::{Error, Result};
use crate::utils::write_stdout;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Kind {
    /// RSA key pair
    Rsa,
    /// ECDSA key pair on P-256
    Ecdsa,
    /// ECDH key pair on X25519
    Ecdh,
    /// Ed25519 key pair
    Ed25519,
    /// Self-signed ECDSA P-256 certificate
    Certificate,
}

#[derive(Args)]
pub(crate) struct Config {
    /// What to generate
    #[arg(value_enum)]
    kind: Kind,

    /// RSA modulus size in bits
    #[arg(long, default_value_t = 2048)]
    bits: usize,

    /// Print the public key instead of the private key
    #[arg(long)]
    public: bool,

    /// Common name and DNS subject alternative name of the certificate
    #[arg(long, default_value = "localhost")]
    common_name: String,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let value = generate(&config)?;
    let value = if config.public {
        value
            .public_key()
            .ok_or_else(|| Error::PublicKeyExtraction(value.variant().to_string()))?
    } else {
        value
    };
    info!(kind = ?config.kind, variant = %value.variant(), "generated");

    write_stdout(&encode(&value)?)
}

fn generate(config: &Config) -> Result<PemValue> {
    let value = match config.kind {
        Kind::Rsa => PemValue::from(rsa::RsaPrivateKey::new(&mut OsRng, config.bits)?),
        Kind::Ecdsa => PemValue::from(p256::ecdsa::SigningKey::random(&mut OsRng)),
        Kind::Ecdh => PemValue::from(x25519_dalek::StaticSecret::random_from_rng(OsRng)),
        Kind::Ed25519 => PemValue::from(ed25519_dalek::SigningKey::generate(&mut OsRng)),
        Kind::Certificate => PemValue::from(self_signed_certificate(&config.common_name)?),
    };
    Ok(value)
}

fn self_signed_certificate(common_name: &str) -> Result<x509_cert::Certificate> {
    let key_pair = rcgen::KeyPair::generate()?;
    let mut params = rcgen::CertificateParams::new(vec![common_name.to_string()])?;
    params
        .distinguished_name
        .push(rcgen::DnType::CommonName, common_name);
    let cert = params.self_signed(&key_pair)?;
    Ok(x509_cert::Certificate::from_der(cert.der())?)
}
