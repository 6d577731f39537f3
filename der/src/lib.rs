//! Minimal DER reader.
//!
//! Parses DER bytes into a tree of [`Tlv`] nodes. Constructed encodings
//! (SEQUENCE, SET, constructed context-specific tags) are parsed recursively,
//! primitive ones keep their raw content octets. The [`envelope`] module builds
//! typed views of the PKCS#8 and SubjectPublicKeyInfo key envelopes on top of
//! this tree.

use nom::{IResult, Parser};
use pemkit::decoder::{DecodableFrom, Decoder};

pub mod envelope;
pub mod error;
pub mod oid;

use error::{Error, Result};

const MAX_DEPTH: usize = 32;

/// Top-level DER elements in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    /// Returns the only top-level element.
    pub fn single(&self) -> Result<&Tlv> {
        match self.elements.as_slice() {
            [tlv] => Ok(tlv),
            elements => Err(Error::UnexpectedElementCount(elements.len())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    ContextSpecific { number: u8, constructed: bool },
    Unimplemented(u8),
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        if value & 0xc0 == 0x80 {
            return Tag::ContextSpecific {
                number: value & 0x1f,
                constructed: is_constructed(value),
            };
        }
        match value {
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            _ => Tag::Unimplemented(value),
        }
    }
}

fn is_constructed(tag: u8) -> bool {
    tag & 0x20 == 0x20
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    length: u64,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Content octets of a primitive element.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Nested elements of a constructed element.
    pub fn children(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Tlv> {
        Self::parse_nested(input, 0)
    }

    fn parse_nested(input: &[u8], depth: usize) -> IResult<&[u8], Tlv> {
        if depth > MAX_DEPTH {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        let (input, raw_tag) = nom::number::be_u8().parse(input)?;
        if raw_tag & 0x1f == 0x1f {
            // high tag number form never appears in key envelopes
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )));
        }
        let (input, length) = parse_length(input)?;
        let (input, data) = nom::bytes::complete::take(length).parse(input)?;
        let tag = Tag::from(raw_tag);

        if is_constructed(raw_tag) {
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (new_input, v) = Self::parse_nested(data, depth + 1)?;
                data = new_input;
                tlvs.push(v);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    length,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                length,
                value: Value::Data(data.to_vec()),
            },
        ))
    }
}

#[cfg(test)]
fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    Ok((input, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u64> {
    let (rest, n) = nom::number::be_u8().parse(input)?;
    if n & 0x80 == 0x80 {
        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let length = n & 0x7f;
        if length == 0 || length > 8 {
            // indefinite length is BER only
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::LengthValue,
            )));
        }
        let (rest, bs) = nom::bytes::complete::take(length).parse(rest)?;
        let n = bs.iter().fold(0u64, |n, &b| (n << 8) | b as u64);
        return Ok((rest, n));
    }
    // short form: 0-127
    Ok((rest, n as u64))
}

fn parse_der(input: &[u8]) -> Result<Der> {
    if input.is_empty() {
        return Err(Error::Empty);
    }
    let mut elements = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        let (new_rest, tlv) = Tlv::parse(rest)?;
        rest = new_rest;
        elements.push(tlv);
    }
    Ok(Der { elements })
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        parse_der(self)
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        parse_der(self)
    }
}

#[cfg(test)]
mod tests {
    use pemkit::decoder::Decoder;
    use rstest::rstest;

    use crate::error::Error;
    use crate::{Der, Tag, Tlv, Value, parse_length, parse_tag};

    #[rstest(input, expected,
        case(vec![0x02], Tag::Integer),
        case(vec![0x02, 0x01], Tag::Integer),
        case(vec![0x30, 0x01], Tag::Sequence),
        case(vec![0xa0, 0x00], Tag::ContextSpecific { number: 0, constructed: true }),
        case(vec![0x81, 0x00], Tag::ContextSpecific { number: 1, constructed: false }),
        case(vec![0x40], Tag::Unimplemented(0x40))
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let actual = parse_tag(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input, expected,
        case(vec![0x02], 0x02),
        case(vec![0x02, 0x01], 0x02),
        case(vec![0x30, 0x01], 0x30),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: u64) {
        let actual = parse_length(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input,
        case(vec![0x80]),
        case(vec![0x89, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01]),
        case(vec![0x82, 0x01])
    )]
    fn test_parse_length_with_error(input: Vec<u8>) {
        assert!(parse_length(&input).is_err());
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x01], Tlv{tag: Tag::Integer, length: 1, value: Value::Data(vec![0x01])}),
        case(vec![0x02, 0x09, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01], Tlv{tag: Tag::Integer, length: 9, value: Value::Data(vec![0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01])}),
        case(vec![0x13, 0x02, 0x68, 0x69], Tlv{tag: Tag::PrintableString, length: 2, value: Value::Data(vec![0x68, 0x69])}),
        case(vec![0x0c, 0x04, 0xf0, 0x9f, 0x98, 0x8e], Tlv{tag: Tag::UTF8String, length: 4, value: Value::Data(vec![0xf0, 0x9f, 0x98, 0x8e])}),
        case(vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], Tlv { tag: Tag::ObjectIdentifier, length: 9, value: Value::Data(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]) }),
        case(vec![0x05, 0x00], Tlv { tag: Tag::Null, length: 0, value: Value::Data(vec![]) }),
        case(vec![0x04, 0x04, 0x03, 0x02, 0x06, 0xa0], Tlv { tag: Tag::OctetString, length: 4, value: Value::Data(vec![0x03, 0x02, 0x06, 0xa0]) }),
        case(vec![0x03, 0x04, 0x06, 0x6e, 0x5d, 0xc0], Tlv { tag: Tag::BitString, length: 4, value: Value::Data(vec![0x06, 0x6e, 0x5d, 0xc0]) }),
        case(vec![0x81, 0x02, 0x00, 0x01], Tlv { tag: Tag::ContextSpecific { number: 1, constructed: false }, length: 2, value: Value::Data(vec![0x00, 0x01]) })
    )]
    fn test_tlv_parse_primitive(input: Vec<u8>, expected: Tlv) {
        let (rest, actual) = Tlv::parse(&input).unwrap();
        assert!(rest.is_empty());
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(
            vec![0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09],
            Tlv { tag: Tag::Sequence, length: 9, value: Value::Tlv(vec![
                Tlv { tag: Tag::Integer, length: 1, value: Value::Data(vec![0x07]) },
                Tlv { tag: Tag::Integer, length: 1, value: Value::Data(vec![0x08]) },
                Tlv { tag: Tag::Integer, length: 1, value: Value::Data(vec![0x09]) },
            ]) }
        ),
        case(
            vec![0xa0, 0x05, 0x30, 0x03, 0x02, 0x01, 0x02],
            Tlv { tag: Tag::ContextSpecific { number: 0, constructed: true }, length: 5, value: Value::Tlv(vec![
                Tlv { tag: Tag::Sequence, length: 3, value: Value::Tlv(vec![
                    Tlv { tag: Tag::Integer, length: 1, value: Value::Data(vec![0x02]) },
                ]) },
            ]) }
        )
    )]
    fn test_tlv_parse_structured(input: Vec<u8>, expected: Tlv) {
        let (_, actual) = Tlv::parse(&input).unwrap();
        assert_eq!(expected, actual);
        assert!(actual.data().is_none());
        assert!(actual.children().is_some());
    }

    #[test]
    fn test_decode_multiple_top_level_elements() {
        let input = vec![0x05, 0x00, 0x02, 0x01, 0x01];
        let der: Der = input.decode().unwrap();
        assert_eq!(der.elements().len(), 2);
        assert_eq!(der.single(), Err(Error::UnexpectedElementCount(2)));
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x30, 0x05, 0x02, 0x01]),
        case(vec![0x30, 0x03, 0x02, 0x05, 0x00]),
        case(vec![0x1f, 0x81, 0x01, 0x00])
    )]
    fn test_decode_with_error(input: Vec<u8>) {
        let result: Result<Der, Error> = input.decode();
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_deep_nesting() {
        let mut input = vec![0x05, 0x00];
        for _ in 0..40 {
            let mut wrapped = vec![0x30, input.len() as u8];
            wrapped.extend_from_slice(&input);
            input = wrapped;
        }
        let result: Result<Der, Error> = input.as_slice().decode();
        assert!(result.is_err());
    }
}
