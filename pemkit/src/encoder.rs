//! Encoder trait, the reverse direction of [`crate::decoder::Decoder`].

/// Converts `self` (of type `T`) into the encoded form `E`.
///
/// The pemkit codec implements `Encoder<PemValue, Pem>` to turn a typed key
/// or certificate into a PEM block.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be encoded from type `T`.
pub trait EncodableTo<T> {}
