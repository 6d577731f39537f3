//! Decoder trait for type-safe conversions.
//!
//! A source type `T` implements `Decoder<T, D>` to produce a `D`. The
//! destination must opt in with `DecodableFrom<T>`.
//!
//! ```no_run
//! use pemkit::decoder::{DecodableFrom, Decoder};
//!
//! struct Armored(String);
//! struct Payload(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct EmptyInput;
//!
//! impl DecodableFrom<Armored> for Payload {}
//!
//! impl Decoder<Armored, Payload> for Armored {
//!     type Error = EmptyInput;
//!
//!     fn decode(&self) -> Result<Payload, Self::Error> {
//!         if self.0.is_empty() {
//!             return Err(EmptyInput);
//!         }
//!         Ok(Payload(self.0.as_bytes().to_vec()))
//!     }
//! }
//! ```

/// Converts `self` (of type `T`) into `D`.
///
/// # Type Parameters
///
/// * `T` - The source type (usually `Self`)
/// * `D` - The destination type, which must implement `DecodableFrom<T>`
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// Has no methods. Implement it for every destination type that a source
/// type is allowed to decode into.
pub trait DecodableFrom<T> {}
