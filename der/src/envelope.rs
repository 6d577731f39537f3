//! Typed views of the generic key envelopes.
//!
//! Only the fields needed to tell key families apart are captured: the
//! envelope shape, its version, and the `AlgorithmIdentifier`. Key material
//! itself is left to the family-specific decoders.
//!
//! ```text
//! PrivateKeyInfo ::= SEQUENCE {                 -- RFC 5208 / RFC 5958
//!     version                   INTEGER { v1(0), v2(1) },
//!     privateKeyAlgorithm       AlgorithmIdentifier,
//!     privateKey                OCTET STRING,
//!     attributes            [0] IMPLICIT Attributes OPTIONAL,
//!     publicKey             [1] IMPLICIT BIT STRING OPTIONAL }
//!
//! SubjectPublicKeyInfo ::= SEQUENCE {           -- RFC 5280
//!     algorithm                 AlgorithmIdentifier,
//!     subjectPublicKey          BIT STRING }
//!
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm                 OBJECT IDENTIFIER,
//!     parameters                ANY DEFINED BY algorithm OPTIONAL }
//!
//! ECPrivateKey ::= SEQUENCE {                   -- RFC 5915 (SEC1)
//!     version                   INTEGER { ecPrivkeyVer1(1) },
//!     privateKey                OCTET STRING,
//!     parameters            [0] ECParameters OPTIONAL,
//!     publicKey             [1] BIT STRING OPTIONAL }
//! ```

use pemkit::decoder::{DecodableFrom, Decoder};

use crate::error::{Error, Result};
use crate::oid::ObjectIdentifier;
use crate::{Der, Tag, Tlv};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameters {
    Absent,
    Null,
    /// Named curve for `id-ecPublicKey`
    Oid(ObjectIdentifier),
    Other(Tag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Parameters,
}

impl TryFrom<&Tlv> for AlgorithmIdentifier {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self> {
        let fields = sequence(tlv, "AlgorithmIdentifier")?;
        let algorithm = fields
            .first()
            .ok_or(Error::MissingField("algorithm"))
            .and_then(object_identifier)?;
        let parameters = match fields.get(1) {
            None => Parameters::Absent,
            Some(param) => match param.tag() {
                Tag::Null => Parameters::Null,
                Tag::ObjectIdentifier => Parameters::Oid(object_identifier(param)?),
                other => Parameters::Other(other),
            },
        };
        Ok(AlgorithmIdentifier {
            algorithm,
            parameters,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V1,
    V2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    pub version: Version,
    pub algorithm: AlgorithmIdentifier,
    pub private_key_len: usize,
    pub has_public_key: bool,
}

impl DecodableFrom<Der> for PrivateKeyInfo {}

impl Decoder<Der, PrivateKeyInfo> for Der {
    type Error = Error;

    fn decode(&self) -> Result<PrivateKeyInfo> {
        let fields = sequence(self.single()?, "PrivateKeyInfo")?;
        let version = match fields.first() {
            Some(v) if v.tag() == Tag::Integer => match v.data() {
                Some([0x00]) => Version::V1,
                Some([0x01]) => Version::V2,
                Some(other) => return Err(Error::UnsupportedVersion(other.to_vec())),
                None => return Err(Error::MissingField("version")),
            },
            Some(v) => {
                return Err(Error::UnexpectedTag {
                    expected: "INTEGER",
                    actual: v.tag(),
                });
            }
            None => return Err(Error::MissingField("version")),
        };
        let algorithm = fields
            .get(1)
            .ok_or(Error::MissingField("privateKeyAlgorithm"))
            .and_then(AlgorithmIdentifier::try_from)?;
        let private_key = fields.get(2).ok_or(Error::MissingField("privateKey"))?;
        if private_key.tag() != Tag::OctetString {
            return Err(Error::UnexpectedTag {
                expected: "OCTET STRING",
                actual: private_key.tag(),
            });
        }
        let has_public_key = fields[3..].iter().any(|f| {
            f.tag()
                == Tag::ContextSpecific {
                    number: 1,
                    constructed: false,
                }
        });

        Ok(PrivateKeyInfo {
            version,
            algorithm,
            private_key_len: private_key.data().map(<[u8]>::len).unwrap_or_default(),
            has_public_key,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub public_key_len: usize,
}

impl DecodableFrom<Der> for SubjectPublicKeyInfo {}

impl Decoder<Der, SubjectPublicKeyInfo> for Der {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let fields = sequence(self.single()?, "SubjectPublicKeyInfo")?;
        if fields.len() != 2 {
            return Err(Error::MissingField("subjectPublicKey"));
        }
        let algorithm = AlgorithmIdentifier::try_from(&fields[0])?;
        let key = &fields[1];
        if key.tag() != Tag::BitString {
            return Err(Error::UnexpectedTag {
                expected: "BIT STRING",
                actual: key.tag(),
            });
        }
        let public_key_len = match key.data() {
            Some([0x00, bits @ ..]) => bits.len(),
            _ => return Err(Error::InvalidBitString),
        };

        Ok(SubjectPublicKeyInfo {
            algorithm,
            public_key_len,
        })
    }
}

/// SEC1 `ECPrivateKey`, reduced to the named curve it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPrivateKey {
    pub curve: Option<ObjectIdentifier>,
}

impl DecodableFrom<Der> for EcPrivateKey {}

impl Decoder<Der, EcPrivateKey> for Der {
    type Error = Error;

    fn decode(&self) -> Result<EcPrivateKey> {
        let fields = sequence(self.single()?, "ECPrivateKey")?;
        match fields.first().map(|v| (v.tag(), v.data())) {
            Some((Tag::Integer, Some([0x01]))) => {}
            Some((Tag::Integer, Some(other))) => {
                return Err(Error::UnsupportedVersion(other.to_vec()));
            }
            _ => return Err(Error::MissingField("version")),
        }
        match fields.get(1) {
            Some(key) if key.tag() == Tag::OctetString => {}
            _ => return Err(Error::MissingField("privateKey")),
        }
        let curve = fields[2..]
            .iter()
            .find(|f| {
                f.tag()
                    == Tag::ContextSpecific {
                        number: 0,
                        constructed: true,
                    }
            })
            .and_then(Tlv::children)
            .and_then(<[Tlv]>::first)
            .map(object_identifier)
            .transpose()?;

        Ok(EcPrivateKey { curve })
    }
}

fn sequence<'a>(tlv: &'a Tlv, name: &'static str) -> Result<&'a [Tlv]> {
    match (tlv.tag(), tlv.children()) {
        (Tag::Sequence, Some(children)) => Ok(children),
        (actual, _) => Err(Error::UnexpectedTag {
            expected: name,
            actual,
        }),
    }
}

fn object_identifier(tlv: &Tlv) -> Result<ObjectIdentifier> {
    match (tlv.tag(), tlv.data()) {
        (Tag::ObjectIdentifier, Some(data)) => ObjectIdentifier::try_from(data),
        (actual, _) => Err(Error::UnexpectedTag {
            expected: "OBJECT IDENTIFIER",
            actual,
        }),
    }
}

#[cfg(test)]
mod tests {
    use pemkit::decoder::Decoder;
    use rstest::rstest;

    use super::*;

    // Ed25519 PKCS#8 v1 from RFC 8410 section 10.3
    const ED25519_PRIVATE: &[u8] = &[
        0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04,
        0x20, 0xd4, 0xee, 0x72, 0xdb, 0xf9, 0x13, 0x58, 0x4a, 0xd5, 0xb6, 0xd8, 0xf1, 0xf7, 0x69,
        0xf8, 0xad, 0x3a, 0xfe, 0x7c, 0x28, 0xcb, 0xf1, 0xd4, 0xfb, 0xe0, 0x97, 0xa8, 0x8f, 0x44,
        0x75, 0x58, 0x42,
    ];

    // Ed25519 SubjectPublicKeyInfo from RFC 8410 section 10.1
    const ED25519_PUBLIC: &[u8] = &[
        0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00, 0x19, 0xbf, 0x44,
        0x09, 0x69, 0x84, 0xcd, 0xfe, 0x85, 0x41, 0xba, 0xc1, 0x67, 0xdc, 0x3b, 0x96, 0xc8, 0x50,
        0x86, 0xaa, 0x30, 0xb6, 0xb6, 0xcb, 0x0c, 0x5c, 0x38, 0xad, 0x70, 0x31, 0x66, 0xe1,
    ];

    // SEQUENCE { SEQUENCE { id-ecPublicKey, prime256v1 }, BIT STRING (65 bytes, truncated body) }
    fn ec_spki() -> Vec<u8> {
        let mut key = vec![0x03, 0x42, 0x00, 0x04];
        key.extend_from_slice(&[0x11; 64]);
        let mut alg = vec![
            0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08, 0x2a,
            0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07,
        ];
        alg.extend_from_slice(&key);
        let mut out = vec![0x30, alg.len() as u8];
        out.extend_from_slice(&alg);
        out
    }

    // SEC1 key on P-256 with a zeroed 32-byte scalar and no public key
    fn sec1(curve: &[u8]) -> Vec<u8> {
        let mut body = vec![0x02, 0x01, 0x01, 0x04, 0x20];
        body.extend_from_slice(&[0x00; 32]);
        if !curve.is_empty() {
            body.extend_from_slice(&[0xa0, curve.len() as u8 + 2, 0x06, curve.len() as u8]);
            body.extend_from_slice(curve);
        }
        let mut out = vec![0x30, body.len() as u8];
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_private_key_info() {
        let der: Der = ED25519_PRIVATE.decode().unwrap();
        let info: PrivateKeyInfo = der.decode().unwrap();

        assert_eq!(info.version, Version::V1);
        assert_eq!(info.algorithm.algorithm, "1.3.101.112");
        assert_eq!(info.algorithm.parameters, Parameters::Absent);
        assert_eq!(info.private_key_len, 34);
        assert!(!info.has_public_key);
    }

    #[test]
    fn test_subject_public_key_info() {
        let der: Der = ED25519_PUBLIC.decode().unwrap();
        let spki: SubjectPublicKeyInfo = der.decode().unwrap();

        assert_eq!(spki.algorithm.algorithm, "1.3.101.112");
        assert_eq!(spki.public_key_len, 32);
    }

    #[test]
    fn test_subject_public_key_info_named_curve() {
        let der: Der = ec_spki().decode().unwrap();
        let spki: SubjectPublicKeyInfo = der.decode().unwrap();

        assert_eq!(spki.algorithm.algorithm, "1.2.840.10045.2.1");
        assert_eq!(
            spki.algorithm.parameters,
            Parameters::Oid("1.2.840.10045.3.1.7".parse().unwrap())
        );
        assert_eq!(spki.public_key_len, 65);
    }

    #[rstest]
    #[case::prime256v1(&[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07], Some("1.2.840.10045.3.1.7"))]
    #[case::secp384r1(&[0x2b, 0x81, 0x04, 0x00, 0x22], Some("1.3.132.0.34"))]
    #[case::implicit(&[], None)]
    fn test_ec_private_key(#[case] curve: &[u8], #[case] expected: Option<&str>) {
        let der: Der = sec1(curve).decode().unwrap();
        let key: EcPrivateKey = der.decode().unwrap();

        assert_eq!(key.curve.map(|oid| oid.to_string()).as_deref(), expected);
    }

    #[test]
    fn test_ec_private_key_rejects_pkcs8() {
        let der: Der = ED25519_PRIVATE.decode().unwrap();
        let result: Result<EcPrivateKey> = der.decode();
        assert_eq!(result, Err(Error::UnsupportedVersion(vec![0x00])));
    }

    #[rstest]
    #[case::public_key_as_private(ED25519_PUBLIC)]
    #[case::bad_version(&[0x30, 0x0e, 0x02, 0x01, 0x05, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x02, 0x04, 0x00])]
    #[case::missing_key(&[0x30, 0x0a, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70])]
    #[case::not_a_sequence(&[0x02, 0x01, 0x00])]
    fn test_private_key_info_with_error(#[case] input: &[u8]) {
        let der: Der = input.decode().unwrap();
        let result: Result<PrivateKeyInfo> = der.decode();
        assert!(result.is_err());
    }

    #[rstest]
    #[case::private_key_as_public(ED25519_PRIVATE)]
    #[case::octet_string_key(&[0x30, 0x0b, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x02, 0x00, 0x01])]
    fn test_subject_public_key_info_with_error(#[case] input: &[u8]) {
        let der: Der = input.decode().unwrap();
        let result: Result<SubjectPublicKeyInfo> = der.decode();
        assert!(result.is_err());
    }
}
