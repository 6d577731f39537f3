use thiserror::Error;

use crate::variant::Variant;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed PEM: {0}")]
    MalformedPem(#[from] pemkit_pem::error::Error),

    #[error("unrecognized PEM label: {0}")]
    UnrecognizedLabel(String),

    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),

    #[error("unsupported key variant: {0}")]
    UnsupportedVariant(String),

    #[error("failed to marshal {variant}: {source}")]
    MarshalFailure { variant: Variant, source: BoxError },

    /// `what` names the variant or the envelope that failed to parse.
    #[error("failed to unmarshal {what}: {source}")]
    UnmarshalFailure {
        what: &'static str,
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn marshal(variant: Variant, source: impl Into<BoxError>) -> Self {
        Error::MarshalFailure {
            variant,
            source: source.into(),
        }
    }

    pub(crate) fn unmarshal(what: &'static str, source: impl Into<BoxError>) -> Self {
        Error::UnmarshalFailure {
            what,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
