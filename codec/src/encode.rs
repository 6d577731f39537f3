use pemkit::encoder::{EncodableTo, Encoder};
use pemkit_pem::Pem;
use pkcs8::{EncodePrivateKey, EncodePublicKey};
use tracing::debug;
use x509_cert::der::Encode;

use crate::error::{Error, Result};
use crate::value::PemValue;
use crate::x25519;

impl EncodableTo<PemValue> for Pem {}

impl Encoder<PemValue, Pem> for PemValue {
    type Error = Error;

    fn encode(&self) -> Result<Pem> {
        let variant = self.variant();
        let der = self.to_der()?;
        debug!(%variant, label = %variant.label(), der_len = der.len(), "encoded PEM block");
        Ok(Pem::from_bytes(variant.label(), &der))
    }
}

impl PemValue {
    /// DER payload of the PEM block this value encodes to.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let variant = self.variant();
        let der = match self {
            PemValue::RsaPrivate(key) => key
                .to_pkcs8_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| Error::marshal(variant, e))?,
            PemValue::RsaPublic(key) => key
                .to_public_key_der()
                .map(|doc| doc.into_vec())
                .map_err(|e| Error::marshal(variant, e))?,
            PemValue::EcdsaPrivate(key) => key
                .to_pkcs8_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| Error::marshal(variant, e))?,
            PemValue::EcdsaPublic(key) => key
                .to_public_key_der()
                .map(|doc| doc.into_vec())
                .map_err(|e| Error::marshal(variant, e))?,
            PemValue::EcdhPrivate(secret) => {
                x25519::private_key_to_der(secret).map_err(|e| Error::marshal(variant, e))?
            }
            PemValue::EcdhPublic(key) => {
                x25519::public_key_to_der(key).map_err(|e| Error::marshal(variant, e))?
            }
            PemValue::Ed25519Private(key) => key
                .to_pkcs8_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| Error::marshal(variant, e))?,
            PemValue::Ed25519Public(key) => key
                .to_public_key_der()
                .map(|doc| doc.into_vec())
                .map_err(|e| Error::marshal(variant, e))?,
            PemValue::Certificate(cert) => cert.to_der().map_err(|e| Error::marshal(variant, e))?,
        };
        Ok(der)
    }
}
