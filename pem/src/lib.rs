pub mod error;

use std::{
    fmt::{Display, Formatter},
    sync::LazyLock,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use error::{Error, Result};
use pemkit::decoder::{DecodableFrom, Decoder};
use regex::Regex;

const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const CERTIFICATE_LABEL: &str = "CERTIFICATE";

// labelchar = %x21-2C / %x2E-7E, single "-" or SP allowed between labelchars.
static BOUNDARY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^-----(BEGIN|END) ([\x21-\x2C\x2E-\x7E](?:[- ]?[\x21-\x2C\x2E-\x7E])*)-----[ \t]*$",
    )
    .ok()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// PKCS#8 private key (non-encrypted)
    PrivateKey,
    /// PKCS#8 encrypted private key
    EncryptedPrivateKey,
    /// PKCS#1 RSA private key
    RSAPrivateKey,
    /// SEC1 EC private key
    ECPrivateKey,
    /// X.509 SubjectPublicKeyInfo
    PublicKey,
    /// PKCS#1 RSA public key
    RSAPublicKey,
    /// X.509 Certificate
    Certificate,
    /// Any other syntactically valid label
    Other(String),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::PrivateKey => PRIVATE_KEY_LABEL,
            Label::EncryptedPrivateKey => ENCRYPTED_PRIVATE_KEY_LABEL,
            Label::RSAPrivateKey => RSA_PRIVATE_KEY_LABEL,
            Label::ECPrivateKey => EC_PRIVATE_KEY_LABEL,
            Label::PublicKey => PUBLIC_KEY_LABEL,
            Label::RSAPublicKey => RSA_PUBLIC_KEY_LABEL,
            Label::Certificate => CERTIFICATE_LABEL,
            Label::Other(label) => label,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        match s {
            PRIVATE_KEY_LABEL => Label::PrivateKey,
            ENCRYPTED_PRIVATE_KEY_LABEL => Label::EncryptedPrivateKey,
            RSA_PRIVATE_KEY_LABEL => Label::RSAPrivateKey,
            EC_PRIVATE_KEY_LABEL => Label::ECPrivateKey,
            PUBLIC_KEY_LABEL => Label::PublicKey,
            RSA_PUBLIC_KEY_LABEL => Label::RSAPublicKey,
            CERTIFICATE_LABEL => Label::Certificate,
            other => Label::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Boundary {
    Begin(Label),
    End(Label),
}

impl Boundary {
    fn parse(line: &str) -> Result<Boundary> {
        let re = BOUNDARY
            .as_ref()
            .ok_or(Error::InvalidEncapsulationBoundary)?;
        let captured = re
            .captures(line)
            .ok_or(Error::InvalidEncapsulationBoundary)?;
        let (Some(kind), Some(label)) = (captured.get(1), captured.get(2)) else {
            return Err(Error::InvalidEncapsulationBoundary);
        };
        let label = Label::from(label.as_str());
        match kind.as_str() {
            "BEGIN" => Ok(Boundary::Begin(label)),
            _ => Ok(Boundary::End(label)),
        }
    }
}

/*
ref: https://www.rfc-editor.org/rfc/rfc7468.html#section-3
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem {
    label: Label,
    base64_data: String, // base64 encoded data, no line breaks
}

impl Pem {
    pub fn from_bytes(label: Label, data: &[u8]) -> Self {
        let base64_data = STANDARD.encode(data);
        Pem { label, base64_data }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn data(&self) -> &str {
        &self.base64_data
    }
}

impl Display for Pem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "-----BEGIN {}-----", self.label)?;
        // RFC 7468: base64 text should be wrapped at 64 characters
        for chunk in self.base64_data.as_bytes().chunks(64) {
            let line = std::str::from_utf8(chunk).map_err(|_| std::fmt::Error)?;
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "-----END {}-----", self.label)
    }
}

impl DecodableFrom<Pem> for Vec<u8> {}

impl Decoder<Pem, Vec<u8>> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>> {
        // This discards label information from Pem format.
        STANDARD.decode(self.data()).map_err(Error::Base64Decode)
    }
}

impl DecodableFrom<String> for Pem {}

impl Decoder<String, Pem> for String {
    type Error = Error;

    fn decode(&self) -> Result<Pem> {
        self.parse()
    }
}

impl DecodableFrom<&str> for Pem {}

impl Decoder<&str, Pem> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Pem> {
        self.parse()
    }
}

impl DecodableFrom<&[u8]> for Pem {}

impl Decoder<&[u8], Pem> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Pem> {
        let text = std::str::from_utf8(self).map_err(|_| Error::NonUtf8Input)?;
        text.parse()
    }
}

impl std::str::FromStr for Pem {
    type Err = Error;

    /// Parses the first PEM block in `s`. Anything after it is ignored.
    fn from_str(s: &str) -> Result<Self> {
        parse_first(s).map(|(pem, _)| pem)
    }
}

/// Parse the first PEM block from a string.
///
/// Explanatory text before the block is skipped. Returns the block together
/// with the unparsed text that follows its post-encapsulation boundary.
///
/// # Example
/// ```
/// use pemkit_pem::{Label, parse_first};
///
/// let input = "-----BEGIN CERTIFICATE-----\nAAA=\n-----END CERTIFICATE-----\ntrailer";
/// let (pem, rest) = parse_first(input).unwrap();
/// assert_eq!(pem.label(), &Label::Certificate);
/// assert_eq!(rest, "trailer");
/// ```
pub fn parse_first(s: &str) -> Result<(Pem, &str)> {
    let mut rest = s;
    let mut state = PemParsingState::default();
    let mut label = None;
    let mut base64_lines = vec![];
    let mut base64_finl_lines = vec![];
    loop {
        match state {
            PemParsingState::Init => match next_line(&mut rest) {
                Some(line) => {
                    if let Ok(Boundary::Begin(l)) = Boundary::parse(line) {
                        label = Some(l);
                        state = PemParsingState::PreEncapsulationBoundary;
                    }
                    // explanatory text before the block is skipped
                    // https://www.rfc-editor.org/rfc/rfc7468.html#section-5.2
                }
                None => return Err(Error::MissingPreEncapsulationBoundary),
            },
            PemParsingState::PreEncapsulationBoundary => match next_line(&mut rest) {
                Some(line) => {
                    if line.trim().is_empty() || Boundary::parse(line).is_ok() {
                        return Err(Error::MissingData);
                    }
                    if is_base64_finl(line) {
                        check_base64_finl(line)?;
                        base64_finl_lines.push(line);
                        state = PemParsingState::Base64Finl;
                    } else {
                        check_base64_line(line)?;
                        base64_lines.push(line);
                        state = PemParsingState::Base64Lines;
                    }
                }
                None => return Err(Error::MissingData),
            },
            PemParsingState::Base64Lines => match next_line(&mut rest) {
                Some(line) => {
                    if line.is_empty() {
                        return Err(Error::InvalidBase64Line);
                    }
                    match Boundary::parse(line) {
                        Ok(Boundary::End(l)) => {
                            check_labels(label.as_ref(), &l)?;
                            state = PemParsingState::PostEncapsulationBoundary;
                        }
                        Ok(Boundary::Begin(_)) => {
                            return Err(Error::MissingPostEncapsulationBoundary);
                        }
                        Err(_) if is_base64_finl(line) => {
                            check_base64_finl(line)?;
                            base64_finl_lines.push(line);
                            state = PemParsingState::Base64Finl;
                        }
                        Err(_) => {
                            check_base64_line(line)?;
                            base64_lines.push(line);
                        }
                    }
                }
                None => return Err(Error::MissingPostEncapsulationBoundary),
            },
            PemParsingState::Base64Finl => match next_line(&mut rest) {
                Some(line) => {
                    if line.is_empty() {
                        return Err(Error::InvalidBase64Finl);
                    }
                    match Boundary::parse(line) {
                        Ok(Boundary::End(l)) => {
                            check_labels(label.as_ref(), &l)?;
                            state = PemParsingState::PostEncapsulationBoundary;
                        }
                        Ok(Boundary::Begin(_)) => {
                            return Err(Error::MissingPostEncapsulationBoundary);
                        }
                        Err(_) => {
                            check_base64_finl(line)?;
                            base64_finl_lines.push(line);
                        }
                    }
                }
                None => return Err(Error::MissingPostEncapsulationBoundary),
            },
            PemParsingState::PostEncapsulationBoundary => break,
        }
    }

    let label = label.ok_or(Error::MissingPreEncapsulationBoundary)?;
    let base64_data = base64_lines
        .iter()
        .chain(base64_finl_lines.iter())
        .map(|l| l.trim())
        .collect::<String>();

    Ok((Pem { label, base64_data }, rest))
}

/// Parse multiple PEM blocks from a string.
///
/// Returns a vector of all PEM blocks found in the input, in order.
///
/// # Example
/// ```
/// use pemkit_pem::parse_many;
///
/// let pem_data = "-----BEGIN CERTIFICATE-----\nAAA=\n-----END CERTIFICATE-----\n-----BEGIN CERTIFICATE-----\nBBB=\n-----END CERTIFICATE-----";
/// let pems = parse_many(pem_data).unwrap();
/// assert_eq!(pems.len(), 2);
/// ```
pub fn parse_many(s: &str) -> Result<Vec<Pem>> {
    // Normalize input: ensure each boundary marker is on its own line
    let normalized = s.replace("----------", "-----\n-----");

    let mut pems = Vec::new();
    let mut rest = normalized.as_str();
    while !rest.trim().is_empty() {
        match parse_first(rest) {
            Ok((pem, tail)) => {
                pems.push(pem);
                rest = tail;
            }
            // only explanatory text left after the last block
            Err(Error::MissingPreEncapsulationBoundary) if !pems.is_empty() => break,
            Err(e) => return Err(e),
        }
    }

    if pems.is_empty() {
        return Err(Error::MissingPreEncapsulationBoundary);
    }

    Ok(pems)
}

/*
* pre-eb ->          base64finl -> post-eb
*        -> base64lines-|---------->
*            |_|
 */
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
enum PemParsingState {
    #[default]
    Init,
    PreEncapsulationBoundary,
    Base64Lines,
    Base64Finl,
    PostEncapsulationBoundary,
}

/// Splits off the next line. Accepts both LF and CRLF endings.
fn next_line<'a>(rest: &mut &'a str) -> Option<&'a str> {
    if rest.is_empty() {
        return None;
    }
    let (line, tail) = match rest.find('\n') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (*rest, ""),
    };
    *rest = tail;
    Some(line.strip_suffix('\r').unwrap_or(line))
}

fn check_labels(begin: Option<&Label>, end: &Label) -> Result<()> {
    match begin {
        Some(begin) if begin == end => Ok(()),
        Some(begin) => Err(Error::LabelMissMatch {
            begin: begin.to_string(),
            end: end.to_string(),
        }),
        None => Err(Error::MissingPreEncapsulationBoundary),
    }
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

fn check_base64_line(line: &str) -> Result<()> {
    // base64line = 1*base64char *WSP eol
    let content = line.trim_end_matches([' ', '\t']);
    if content.is_empty() || !content.chars().all(is_base64_char) {
        return Err(Error::InvalidBase64Line);
    }
    Ok(())
}

fn check_base64_finl(line: &str) -> Result<()> {
    // base64finl = *base64char (base64pad *WSP eol base64pad / *2base64pad) *WSP eol
    // exp-1)
    // ..AB=\s\s\s\n
    // =\s\s\n
    // exp-2)
    // ..AB==\s\s\n
    let content = line.trim_end_matches([' ', '\t']);
    let padding = content.trim_start_matches(is_base64_char);
    if padding.is_empty() || padding.len() > 2 || !padding.chars().all(|c| c == '=') {
        return Err(Error::InvalidBase64Finl);
    }
    Ok(())
}

fn is_base64_finl(line: &str) -> bool {
    line.contains('=')
}
