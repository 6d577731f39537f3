use std::fs;
use std::io::{self, Read, Write};

use pemkit::decoder::Decoder;
use pemkit_pem::Pem;

use crate::error::Result;

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// The PEM block the codec decodes from `input`, and its DER payload.
pub(crate) fn first_block(input: &[u8]) -> Result<(Pem, Vec<u8>)> {
    let text = std::str::from_utf8(input)?;
    let (pem, _) = pemkit_codec::leading_block(text)?;
    let der: Vec<u8> = pem.decode()?;
    Ok((pem, der))
}

pub(crate) fn write_stdout(data: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(data)?;
    stdout.flush()?;
    Ok(())
}

/// Colon separated upper-case hex, as used for fingerprints and serials.
pub(crate) fn format_hex_colon(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Format binary data as hexadecimal dump
///
/// Returns a string formatted in hexdump style (similar to `xxd` command):
/// - 16 bytes per line
/// - Offset in hexadecimal
/// - Hex bytes with space separator
/// - ASCII representation on the right
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", offset * BYTES_PER_LINE));

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(byte) => output.push_str(&format!("{:02x} ", byte)),
                None => output.push_str("   "),
            }
            if i == 7 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        output.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        output.push_str("|\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{format_hex_colon, format_hex_dump};

    #[rstest(input, expected,
        case(vec![], ""),
        case(vec![0x30, 0x00], "00000000  30 00                                             |0.|\n"),
        case(
            b"0123456789abcdefXY".to_vec(),
            "00000000  30 31 32 33 34 35 36 37  38 39 61 62 63 64 65 66  |0123456789abcdef|\n\
             00000010  58 59                                             |XY|\n"
        )
    )]
    fn test_format_hex_dump(input: Vec<u8>, expected: &str) {
        assert_eq!(format_hex_dump(&input), expected);
    }

    #[test]
    fn test_format_hex_colon() {
        assert_eq!(format_hex_colon(&[0x01, 0xab, 0xff]), "01:AB:FF");
        assert_eq!(format_hex_colon(&[]), "");
    }
}
