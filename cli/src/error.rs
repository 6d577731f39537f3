use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PEM error: {0}")]
    Pem(#[from] pemkit_pem::error::Error),

    #[error(transparent)]
    Codec(#[from] pemkit_codec::Error),

    #[error("RSA key generation error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("certificate generation error: {0}")]
    Rcgen(#[from] rcgen::Error),

    #[error("DER error: {0}")]
    Der(#[from] x509_cert::der::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install logger: {0}")]
    LogInit(#[from] tracing_subscriber::util::TryInitError),

    #[error("cannot extract public key from {0}")]
    PublicKeyExtraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
