//! The closed set of values the codec understands.

use rsa::traits::PublicKeyParts;

use crate::variant::Variant;

/// A key or certificate that can be written to and read back from PEM.
///
/// Equality is field-wise. X25519 secrets are compared by their scalar
/// bytes. `Debug` output never contains private key material.
#[derive(Clone)]
pub enum PemValue {
    RsaPrivate(rsa::RsaPrivateKey),
    RsaPublic(rsa::RsaPublicKey),
    EcdsaPrivate(p256::ecdsa::SigningKey),
    EcdsaPublic(p256::ecdsa::VerifyingKey),
    EcdhPrivate(x25519_dalek::StaticSecret),
    EcdhPublic(x25519_dalek::PublicKey),
    Ed25519Private(ed25519_dalek::SigningKey),
    Ed25519Public(ed25519_dalek::VerifyingKey),
    Certificate(x509_cert::Certificate),
}

impl PemValue {
    pub fn variant(&self) -> Variant {
        match self {
            PemValue::RsaPrivate(_) => Variant::RsaPrivate,
            PemValue::RsaPublic(_) => Variant::RsaPublic,
            PemValue::EcdsaPrivate(_) => Variant::EcdsaPrivate,
            PemValue::EcdsaPublic(_) => Variant::EcdsaPublic,
            PemValue::EcdhPrivate(_) => Variant::EcdhPrivate,
            PemValue::EcdhPublic(_) => Variant::EcdhPublic,
            PemValue::Ed25519Private(_) => Variant::Ed25519Private,
            PemValue::Ed25519Public(_) => Variant::Ed25519Public,
            PemValue::Certificate(_) => Variant::Certificate,
        }
    }

    /// Key size in bits.
    ///
    /// For RSA keys this is the modulus length. P-256, X25519 and Ed25519
    /// keys are always 256 bits. Certificates return `None`.
    pub fn key_bits(&self) -> Option<usize> {
        match self {
            PemValue::RsaPrivate(key) => Some(key.n().bits()),
            PemValue::RsaPublic(key) => Some(key.n().bits()),
            PemValue::EcdsaPrivate(_)
            | PemValue::EcdsaPublic(_)
            | PemValue::EcdhPrivate(_)
            | PemValue::EcdhPublic(_)
            | PemValue::Ed25519Private(_)
            | PemValue::Ed25519Public(_) => Some(256),
            PemValue::Certificate(_) => None,
        }
    }

    /// Derives the public half of a private key.
    ///
    /// Returns `None` for public keys and certificates.
    pub fn public_key(&self) -> Option<PemValue> {
        match self {
            PemValue::RsaPrivate(key) => Some(PemValue::RsaPublic(key.to_public_key())),
            PemValue::EcdsaPrivate(key) => {
                Some(PemValue::EcdsaPublic(p256::ecdsa::VerifyingKey::from(key)))
            }
            PemValue::EcdhPrivate(key) => {
                Some(PemValue::EcdhPublic(x25519_dalek::PublicKey::from(key)))
            }
            PemValue::Ed25519Private(key) => Some(PemValue::Ed25519Public(key.verifying_key())),
            _ => None,
        }
    }

    pub fn is_private(&self) -> bool {
        self.variant().is_private()
    }

    pub fn as_rsa_private(&self) -> Option<&rsa::RsaPrivateKey> {
        match self {
            PemValue::RsaPrivate(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_rsa_public(&self) -> Option<&rsa::RsaPublicKey> {
        match self {
            PemValue::RsaPublic(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ecdsa_private(&self) -> Option<&p256::ecdsa::SigningKey> {
        match self {
            PemValue::EcdsaPrivate(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ecdsa_public(&self) -> Option<&p256::ecdsa::VerifyingKey> {
        match self {
            PemValue::EcdsaPublic(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ecdh_private(&self) -> Option<&x25519_dalek::StaticSecret> {
        match self {
            PemValue::EcdhPrivate(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ecdh_public(&self) -> Option<&x25519_dalek::PublicKey> {
        match self {
            PemValue::EcdhPublic(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ed25519_private(&self) -> Option<&ed25519_dalek::SigningKey> {
        match self {
            PemValue::Ed25519Private(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ed25519_public(&self) -> Option<&ed25519_dalek::VerifyingKey> {
        match self {
            PemValue::Ed25519Public(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_certificate(&self) -> Option<&x509_cert::Certificate> {
        match self {
            PemValue::Certificate(cert) => Some(cert),
            _ => None,
        }
    }
}

impl PartialEq for PemValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PemValue::RsaPrivate(a), PemValue::RsaPrivate(b)) => a == b,
            (PemValue::RsaPublic(a), PemValue::RsaPublic(b)) => a == b,
            (PemValue::EcdsaPrivate(a), PemValue::EcdsaPrivate(b)) => a == b,
            (PemValue::EcdsaPublic(a), PemValue::EcdsaPublic(b)) => a == b,
            (PemValue::EcdhPrivate(a), PemValue::EcdhPrivate(b)) => a.to_bytes() == b.to_bytes(),
            (PemValue::EcdhPublic(a), PemValue::EcdhPublic(b)) => a == b,
            (PemValue::Ed25519Private(a), PemValue::Ed25519Private(b)) => a == b,
            (PemValue::Ed25519Public(a), PemValue::Ed25519Public(b)) => a == b,
            (PemValue::Certificate(a), PemValue::Certificate(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PemValue {}

impl std::fmt::Debug for PemValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PemValue::RsaPrivate(_)
            | PemValue::EcdsaPrivate(_)
            | PemValue::EcdhPrivate(_)
            | PemValue::Ed25519Private(_) => write!(f, "{:?}(<redacted>)", self.variant()),
            PemValue::RsaPublic(key) => f.debug_tuple("RsaPublic").field(key).finish(),
            PemValue::EcdsaPublic(key) => f.debug_tuple("EcdsaPublic").field(key).finish(),
            PemValue::EcdhPublic(key) => f.debug_tuple("EcdhPublic").field(key).finish(),
            PemValue::Ed25519Public(key) => f.debug_tuple("Ed25519Public").field(key).finish(),
            PemValue::Certificate(cert) => f
                .debug_tuple("Certificate")
                .field(&cert.tbs_certificate.subject.to_string())
                .finish(),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for PemValue {
                fn from(value: $ty) -> Self {
                    PemValue::$variant(value)
                }
            }
        )+
    };
}

impl_from! {
    rsa::RsaPrivateKey => RsaPrivate,
    rsa::RsaPublicKey => RsaPublic,
    p256::ecdsa::SigningKey => EcdsaPrivate,
    p256::ecdsa::VerifyingKey => EcdsaPublic,
    x25519_dalek::StaticSecret => EcdhPrivate,
    x25519_dalek::PublicKey => EcdhPublic,
    ed25519_dalek::SigningKey => Ed25519Private,
    ed25519_dalek::VerifyingKey => Ed25519Public,
    x509_cert::Certificate => Certificate,
}
