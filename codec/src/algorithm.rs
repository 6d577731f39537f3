//! Algorithm identifiers that map a key envelope onto a [`KeyFamily`].

use pemkit_der::envelope::{AlgorithmIdentifier, Parameters};

use crate::error::{Error, Result};
use crate::variant::KeyFamily;

pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const OID_X25519: &str = "1.3.101.110";
pub const OID_ED25519: &str = "1.3.101.112";

pub const OID_PRIME256V1: &str = "1.2.840.10045.3.1.7";

fn describe(oid: &str) -> &'static str {
    match oid {
        "1.2.840.10040.4.1" => "DSA",
        "1.2.840.113549.1.1.10" => "RSASSA-PSS",
        "1.3.101.111" => "X448",
        "1.3.101.113" => "Ed448",
        "1.3.132.0.34" => "secp384r1",
        "1.3.132.0.35" => "secp521r1",
        "1.3.132.0.10" => "secp256k1",
        _ => "unknown",
    }
}

/// Resolves the key family of an envelope's algorithm identifier.
///
/// `id-ecPublicKey` is accepted only with the `prime256v1` named curve.
pub(crate) fn classify(algorithm: &AlgorithmIdentifier) -> Result<KeyFamily> {
    let oid = algorithm.algorithm.to_string();
    match oid.as_str() {
        OID_RSA_ENCRYPTION => Ok(KeyFamily::Rsa),
        OID_X25519 => Ok(KeyFamily::Ecdh),
        OID_ED25519 => Ok(KeyFamily::Ed25519),
        OID_EC_PUBLIC_KEY => match &algorithm.parameters {
            Parameters::Oid(curve) => check_curve(&curve.to_string()).map(|_| KeyFamily::Ecdsa),
            other => Err(Error::UnsupportedVariant(format!(
                "EC key without a named curve ({other:?})"
            ))),
        },
        _ => Err(Error::UnsupportedVariant(format!(
            "algorithm {oid} ({})",
            describe(&oid)
        ))),
    }
}

pub(crate) fn check_curve(curve: &str) -> Result<()> {
    if curve == OID_PRIME256V1 {
        return Ok(());
    }
    Err(Error::UnsupportedVariant(format!(
        "EC curve {curve} ({})",
        describe(curve)
    )))
}

#[cfg(test)]
mod tests {
    use pemkit_der::envelope::{AlgorithmIdentifier, Parameters};
    use rstest::rstest;

    use super::*;

    fn alg(oid: &str, parameters: Parameters) -> AlgorithmIdentifier {
        AlgorithmIdentifier {
            algorithm: oid.parse().unwrap(),
            parameters,
        }
    }

    #[rstest]
    #[case(alg(OID_RSA_ENCRYPTION, Parameters::Null), KeyFamily::Rsa)]
    #[case(alg(OID_EC_PUBLIC_KEY, Parameters::Oid(OID_PRIME256V1.parse().unwrap())), KeyFamily::Ecdsa)]
    #[case(alg(OID_X25519, Parameters::Absent), KeyFamily::Ecdh)]
    #[case(alg(OID_ED25519, Parameters::Absent), KeyFamily::Ed25519)]
    fn test_classify(#[case] algorithm: AlgorithmIdentifier, #[case] expected: KeyFamily) {
        assert_eq!(classify(&algorithm).unwrap(), expected);
    }

    #[rstest]
    #[case::dsa(alg("1.2.840.10040.4.1", Parameters::Absent), "DSA")]
    #[case::ed448(alg("1.3.101.113", Parameters::Absent), "Ed448")]
    #[case::p384(alg(OID_EC_PUBLIC_KEY, Parameters::Oid("1.3.132.0.34".parse().unwrap())), "secp384r1")]
    #[case::implicit_curve(alg(OID_EC_PUBLIC_KEY, Parameters::Null), "named curve")]
    fn test_classify_unsupported(#[case] algorithm: AlgorithmIdentifier, #[case] needle: &str) {
        match classify(&algorithm) {
            Err(Error::UnsupportedVariant(msg)) => assert!(msg.contains(needle), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
