use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

/// OBJECT IDENTIFIER as a list of arcs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    /// Decodes the content octets of an OBJECT IDENTIFIER.
    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::InvalidObjectIdentifier("no data"));
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for &b in value {
            if val > u64::MAX >> 7 {
                return Err(Error::InvalidObjectIdentifier("arc overflows u64"));
            }
            val = (val << 7) | (b & 0x7f) as u64;
            pending = b & 0x80 == 0x80;
            if !pending {
                subidentifiers.push(val);
                val = 0;
            }
        }
        if pending {
            return Err(Error::InvalidObjectIdentifier("incomplete encoding"));
        }

        // The first subidentifier packs the first two arcs as X * 40 + Y.
        let first = subidentifiers[0];
        let (x, y) = match first {
            0..40 => (0, first),
            40..80 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut arcs = vec![x, y];
        arcs.extend_from_slice(&subidentifiers[1..]);

        Ok(ObjectIdentifier { arcs })
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .arcs
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|_| Error::InvalidObjectIdentifier("non-numeric arc"))
            })
            .collect::<Result<Vec<u64>>>()?;
        if arcs.len() < 2 {
            return Err(Error::InvalidObjectIdentifier("too few arcs"));
        }
        Ok(ObjectIdentifier { arcs })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ObjectIdentifier;

    #[rstest(input, expected,
        case(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], "1.2.840.113549.1.1.1"),
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01], "1.2.840.10045.2.1"),
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07], "1.2.840.10045.3.1.7"),
        case(vec![0x2b, 0x65, 0x70], "1.3.101.112"),
        case(vec![0x2b, 0x65, 0x6e], "1.3.101.110"),
        case(vec![0x88, 0x37, 0x01], "2.999.1")
    )]
    fn test_decode_oid(input: Vec<u8>, expected: &str) {
        let oid = ObjectIdentifier::try_from(input.as_slice()).unwrap();
        assert_eq!(oid, expected);
        assert_eq!(oid, expected.parse::<ObjectIdentifier>().unwrap());
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x2a, 0x86]),
        case(vec![0x2b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f])
    )]
    fn test_decode_oid_with_error(input: Vec<u8>) {
        assert!(ObjectIdentifier::try_from(input.as_slice()).is_err());
    }

    #[rstest(input, case(""), case("1"), case("1.2.x"))]
    fn test_parse_oid_with_error(input: &str) {
        assert!(input.parse::<ObjectIdentifier>().is_err());
    }
}
