//! X25519 key envelopes (RFC 8410).
//!
//! `x25519-dalek` has no PKCS#8 support of its own, so the envelopes are
//! assembled from the `pkcs8` building blocks.

use pkcs8::der::asn1::{BitStringRef, OctetString, OctetStringRef};
use pkcs8::der::{Decode, Encode};
use pkcs8::{AlgorithmIdentifierRef, ObjectIdentifier, PrivateKeyInfo, SubjectPublicKeyInfoRef};
use x25519_dalek::{PublicKey, StaticSecret};

const X25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");

const KEY_LEN: usize = 32;

fn algorithm() -> AlgorithmIdentifierRef<'static> {
    AlgorithmIdentifierRef {
        oid: X25519_OID,
        parameters: None,
    }
}

/// PKCS#8 v1 `PrivateKeyInfo` wrapping `CurvePrivateKey ::= OCTET STRING`.
pub(crate) fn private_key_to_der(secret: &StaticSecret) -> pkcs8::Result<Vec<u8>> {
    let inner = OctetString::new(secret.to_bytes())?.to_der()?;
    Ok(PrivateKeyInfo::new(algorithm(), &inner).to_der()?)
}

pub(crate) fn public_key_to_der(key: &PublicKey) -> pkcs8::spki::Result<Vec<u8>> {
    let spki = SubjectPublicKeyInfoRef {
        algorithm: algorithm(),
        subject_public_key: BitStringRef::from_bytes(key.as_bytes())?,
    };
    Ok(spki.to_der()?)
}

pub(crate) fn private_key_from_der(der: &[u8]) -> pkcs8::Result<StaticSecret> {
    let info = PrivateKeyInfo::from_der(der)?;
    info.algorithm.assert_algorithm_oid(X25519_OID)?;
    let scalar = OctetStringRef::from_der(info.private_key)?;
    let bytes: [u8; KEY_LEN] = scalar
        .as_bytes()
        .try_into()
        .map_err(|_| pkcs8::Error::KeyMalformed)?;
    if let Some(public) = info.public_key {
        let derived = PublicKey::from(&StaticSecret::from(bytes));
        if derived.as_bytes() != public {
            return Err(pkcs8::Error::KeyMalformed);
        }
    }
    Ok(StaticSecret::from(bytes))
}

pub(crate) fn public_key_from_der(der: &[u8]) -> pkcs8::spki::Result<PublicKey> {
    let spki = SubjectPublicKeyInfoRef::from_der(der)?;
    spki.algorithm.assert_algorithm_oid(X25519_OID)?;
    let bytes: [u8; KEY_LEN] = spki
        .subject_public_key
        .as_bytes()
        .and_then(|b| b.try_into().ok())
        .ok_or(pkcs8::spki::Error::KeyMalformed)?;
    Ok(PublicKey::from(bytes))
}
