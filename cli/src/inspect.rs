use std::fmt::Write;

use clap::Args;
use pemkit_codec::PemValue;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{first_block, format_hex_colon, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM file. If not specified, reads from stdin
    file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct Report {
    variant: String,
    label: String,
    family: Option<String>,
    key_bits: Option<usize>,
    der_length: usize,
    fingerprint_sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    certificate: Option<CertificateReport>,
}

#[derive(Debug, Serialize)]
struct CertificateReport {
    serial: String,
    subject: String,
    issuer: String,
    not_before: String,
    not_after: String,
    /// Validity bounds as seconds since the Unix epoch
    not_before_unix: u64,
    not_after_unix: u64,
}

impl Report {
    fn new(label: &str, der: &[u8], value: &PemValue) -> Self {
        let variant = value.variant();
        Report {
            variant: variant.to_string(),
            label: label.to_string(),
            family: variant.family().map(|f| f.to_string()),
            key_bits: value.key_bits(),
            der_length: der.len(),
            fingerprint_sha256: format_hex_colon(&Sha256::digest(der)),
            certificate: value.as_certificate().map(CertificateReport::new),
        }
    }
}

impl CertificateReport {
    fn new(cert: &x509_cert::Certificate) -> Self {
        let tbs = &cert.tbs_certificate;
        CertificateReport {
            serial: format_hex_colon(tbs.serial_number.as_bytes()),
            subject: tbs.subject.to_string(),
            issuer: tbs.issuer.to_string(),
            not_before: tbs.validity.not_before.to_date_time().to_string(),
            not_after: tbs.validity.not_after.to_date_time().to_string(),
            not_before_unix: tbs.validity.not_before.to_unix_duration().as_secs(),
            not_after_unix: tbs.validity.not_after.to_unix_duration().as_secs(),
        }
    }
}

fn format_text(report: &Report) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Variant: {}", report.variant)?;
    writeln!(out, "Label: {}", report.label)?;
    if let Some(family) = &report.family {
        writeln!(out, "Family: {family}")?;
    }
    if let Some(bits) = report.key_bits {
        writeln!(out, "Key Size: {bits} bits")?;
    }
    writeln!(out, "DER Length: {} bytes", report.der_length)?;
    writeln!(out, "SHA256 Fingerprint: {}", report.fingerprint_sha256)?;
    if let Some(cert) = &report.certificate {
        writeln!(out, "Serial Number: {}", cert.serial)?;
        writeln!(out, "Subject: {}", cert.subject)?;
        writeln!(out, "Issuer: {}", cert.issuer)?;
        writeln!(out, "Not Before: {}", cert.not_before)?;
        writeln!(out, "Not After: {}", cert.not_after)?;
    }
    Ok(out)
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let value = pemkit_codec::decode(&input)?;
    let (pem, der) = first_block(&input)?;
    let report = Report::new(pem.label().as_str(), &der, &value);

    match config.output {
        OutputFormat::Text => print!("{}", format_text(&report)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&report)?),
    }

    Ok(())
}
