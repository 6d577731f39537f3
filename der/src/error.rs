use thiserror::Error;

use crate::Tag;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no DER data")]
    Empty,
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
    #[error("expected a single top-level element, found {0}")]
    UnexpectedElementCount(usize),
    #[error("expected {expected}, got {actual:?}")]
    UnexpectedTag { expected: &'static str, actual: Tag },
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("unsupported version: {0:02x?}")]
    UnsupportedVersion(Vec<u8>),
    #[error("OBJECT IDENTIFIER: {0}")]
    InvalidObjectIdentifier(&'static str),
    #[error("BIT STRING: invalid unused bits")]
    InvalidBitString,
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parser(e.code),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
