//! # pemkit
//!
//! Conversion traits shared by the pemkit crates.
//!
//! Every layer of pemkit moves data one step along this chain:
//! ```text
//! bytes → Pem → Vec<u8> (DER) → Der → envelope view / PemValue
//! ```
//!
//! Decoding steps implement [`decoder::Decoder`], encoding steps implement
//! [`encoder::Encoder`]. The marker traits [`decoder::DecodableFrom`] and
//! [`encoder::EncodableTo`] restrict each conversion to the pairs that are
//! actually supported, so an unsupported conversion is a compile error.
//!
//! ## Example
//!
//! ```ignore
//! use pemkit::decoder::Decoder;
//! use pemkit_codec::PemValue;
//! use pemkit_pem::Pem;
//!
//! let pem: Pem = text.parse()?;
//! let value: PemValue = pem.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
