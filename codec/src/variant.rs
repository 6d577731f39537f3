use std::fmt::Display;

use pemkit_pem::Label;

/// Key algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    Ecdsa,
    Ecdh,
    Ed25519,
}

impl KeyFamily {
    pub fn name(&self) -> &'static str {
        match self {
            KeyFamily::Rsa => "RSA",
            KeyFamily::Ecdsa => "ECDSA",
            KeyFamily::Ecdh => "ECDH",
            KeyFamily::Ed25519 => "Ed25519",
        }
    }
}

impl Display for KeyFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a [`PemValue`](crate::PemValue), without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    RsaPrivate,
    RsaPublic,
    EcdsaPrivate,
    EcdsaPublic,
    EcdhPrivate,
    EcdhPublic,
    Ed25519Private,
    Ed25519Public,
    Certificate,
}

impl Variant {
    pub const ALL: [Variant; 9] = [
        Variant::RsaPrivate,
        Variant::RsaPublic,
        Variant::EcdsaPrivate,
        Variant::EcdsaPublic,
        Variant::EcdhPrivate,
        Variant::EcdhPublic,
        Variant::Ed25519Private,
        Variant::Ed25519Public,
        Variant::Certificate,
    ];

    /// Key family, or `None` for certificates.
    pub fn family(&self) -> Option<KeyFamily> {
        match self {
            Variant::RsaPrivate | Variant::RsaPublic => Some(KeyFamily::Rsa),
            Variant::EcdsaPrivate | Variant::EcdsaPublic => Some(KeyFamily::Ecdsa),
            Variant::EcdhPrivate | Variant::EcdhPublic => Some(KeyFamily::Ecdh),
            Variant::Ed25519Private | Variant::Ed25519Public => Some(KeyFamily::Ed25519),
            Variant::Certificate => None,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(
            self,
            Variant::RsaPrivate
                | Variant::EcdsaPrivate
                | Variant::EcdhPrivate
                | Variant::Ed25519Private
        )
    }

    /// PEM label written by the encoder.
    pub fn label(&self) -> Label {
        match self {
            Variant::Certificate => Label::Certificate,
            v if v.is_private() => Label::PrivateKey,
            _ => Label::PublicKey,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::RsaPrivate => "RSA private key",
            Variant::RsaPublic => "RSA public key",
            Variant::EcdsaPrivate => "ECDSA private key",
            Variant::EcdsaPublic => "ECDSA public key",
            Variant::EcdhPrivate => "ECDH private key",
            Variant::EcdhPublic => "ECDH public key",
            Variant::Ed25519Private => "Ed25519 private key",
            Variant::Ed25519Public => "Ed25519 public key",
            Variant::Certificate => "certificate",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use pemkit_pem::Label;
    use rstest::rstest;

    use super::{KeyFamily, Variant};

    #[rstest]
    #[case(Variant::RsaPrivate, Some(KeyFamily::Rsa), true, Label::PrivateKey)]
    #[case(Variant::RsaPublic, Some(KeyFamily::Rsa), false, Label::PublicKey)]
    #[case(Variant::EcdsaPrivate, Some(KeyFamily::Ecdsa), true, Label::PrivateKey)]
    #[case(Variant::EcdsaPublic, Some(KeyFamily::Ecdsa), false, Label::PublicKey)]
    #[case(Variant::EcdhPrivate, Some(KeyFamily::Ecdh), true, Label::PrivateKey)]
    #[case(Variant::EcdhPublic, Some(KeyFamily::Ecdh), false, Label::PublicKey)]
    #[case(Variant::Ed25519Private, Some(KeyFamily::Ed25519), true, Label::PrivateKey)]
    #[case(Variant::Ed25519Public, Some(KeyFamily::Ed25519), false, Label::PublicKey)]
    #[case(Variant::Certificate, None, false, Label::Certificate)]
    fn test_variant_properties(
        #[case] variant: Variant,
        #[case] family: Option<KeyFamily>,
        #[case] private: bool,
        #[case] label: Label,
    ) {
        assert_eq!(variant.family(), family);
        assert_eq!(variant.is_private(), private);
        assert_eq!(variant.label(), label);
    }

    #[test]
    fn test_variant_names_are_distinct() {
        let mut names: Vec<_> = Variant::ALL.iter().map(Variant::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Variant::ALL.len());
    }
}
