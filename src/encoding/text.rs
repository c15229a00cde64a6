//! String <-> byte conversion for each supported encoding
//!
//! `encode` turns text into bytes, `decode` turns bytes into text, and
//! `byte_length` predicts the size of `encode`'s output without allocating.
//! Text is measured in UTF-16 code units wherever an encoding is defined per
//! code unit (utf16le, latin1, ascii, hex).

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use super::Encoding;
use crate::{
    config::MAX_CHAR_CODE_CHUNK,
    error::{BufferError, Result},
};

/// Standard alphabet, padded on output, forgiving about padding and
/// non-canonical trailing bits on input
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode `input` into bytes
///
/// # Errors
///
/// Returns [`BufferError::InvalidParameter`] if the base64 decoder rejects the
/// sanitized input.
pub fn encode(input: &str, encoding: Encoding) -> Result<Vec<u8>> {
    let bytes = match encoding {
        Encoding::Utf8 => input.as_bytes().to_vec(),
        Encoding::Utf16Le => input.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        // Truncation is intended: code units above 255 alias onto their low byte.
        Encoding::Latin1 | Encoding::Ascii => input.encode_utf16().map(|unit| unit as u8).collect(),
        Encoding::Base64 => decode_base64(input)?,
        Encoding::Hex => decode_hex(input),
    };
    Ok(bytes)
}

/// Decode `bytes` into a string
///
/// Invalid UTF-8 sequences and unpaired UTF-16 surrogates are replaced with
/// U+FFFD. A trailing odd byte is ignored by utf16le.
pub fn decode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        Encoding::Utf16Le => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            string_from_code_units(&units)
        }
        Encoding::Latin1 => string_from_bytes(bytes, 0xff),
        Encoding::Ascii => string_from_bytes(bytes, 0x7f),
        Encoding::Base64 => BASE64.encode(bytes),
        Encoding::Hex => hex::encode(bytes),
    }
}

/// Number of bytes `encode(input, encoding)` produces
pub fn byte_length(input: &str, encoding: Encoding) -> usize {
    match encoding {
        Encoding::Utf8 => utf8_length(input),
        Encoding::Latin1 | Encoding::Ascii => input.encode_utf16().count(),
        Encoding::Utf16Le => input.encode_utf16().count() * 2,
        Encoding::Base64 => base64_decoded_length(input),
        Encoding::Hex => input.encode_utf16().count() / 2,
    }
}

/// UTF-8 size of `input`, counted per code point
///
/// A code point outside the basic multilingual plane occupies two UTF-16
/// code units but is counted once, as 4 bytes.
fn utf8_length(input: &str) -> usize {
    input
        .chars()
        .map(|c| match u32::from(c) {
            0..=0x7f => 1,
            0x80..=0x7ff => 2,
            0x800..=0xffff => 3,
            _ => 4,
        })
        .sum()
}

fn base64_decoded_length(input: &str) -> usize {
    let bytes = input.as_bytes();
    let padding = bytes
        .iter()
        .rev()
        .take(2)
        .take_while(|&&b| b == b'=')
        .count();
    (bytes.len() - padding) * 3 / 4
}

/// Decode base64 the way browsers' `atob` and Node do: unknown characters are
/// skipped, url-safe `-`/`_` are accepted, and decoding stops at the first `=`
fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let mut cleaned: Vec<u8> = input
        .bytes()
        .take_while(|&b| b != b'=')
        .filter_map(|b| match b {
            b'-' => Some(b'+'),
            b'_' => Some(b'/'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => Some(b),
            _ => None,
        })
        .collect();
    // A lone sextet cannot form a byte.
    if cleaned.len() % 4 == 1 {
        cleaned.pop();
    }
    BASE64
        .decode(&cleaned)
        .map_err(|err| BufferError::invalid_parameter("base64", err.to_string()))
}

/// Two UTF-16 code units per byte; a trailing odd unit is dropped
fn decode_hex(input: &str) -> Vec<u8> {
    let units: Vec<u16> = input.encode_utf16().collect();
    units.chunks_exact(2).map(parse_hex_pair).collect()
}

/// Read one pair as a base-16 prefix
///
/// Leading whitespace and a sign are accepted, digits are consumed until the
/// first non-hex unit, and the result wraps into a byte. A pair with no
/// leading digit reads as 0, so `"1z"` is 1 and `"z1"` is 0.
fn parse_hex_pair(pair: &[u16]) -> u8 {
    let as_char = |unit: u16| char::from_u32(u32::from(unit));
    let mut units = pair
        .iter()
        .copied()
        .skip_while(|&unit| as_char(unit).is_some_and(char::is_whitespace))
        .peekable();

    let negative = match units.peek().copied().and_then(as_char) {
        Some('-') => {
            units.next();
            true
        }
        Some('+') => {
            units.next();
            false
        }
        _ => false,
    };

    let value = units
        .map_while(|unit| as_char(unit).and_then(|c| c.to_digit(16)))
        .fold(0u32, |acc, digit| acc * 16 + digit) as u8;
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Build a string from single-byte code points, `MAX_CHAR_CODE_CHUNK` at a time
fn string_from_bytes(bytes: &[u8], mask: u8) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.chunks(MAX_CHAR_CODE_CHUNK) {
        out.extend(chunk.iter().map(|&b| char::from(b & mask)));
    }
    out
}

/// Build a string from UTF-16 code units, `MAX_CHAR_CODE_CHUNK` at a time
///
/// A chunk never ends on a high surrogate, so pairs are not split.
fn string_from_code_units(units: &[u16]) -> String {
    let mut out = String::with_capacity(units.len());
    let mut start = 0;
    while start < units.len() {
        let mut end = (start + MAX_CHAR_CODE_CHUNK).min(units.len());
        if end < units.len() && (0xd800..0xdc00).contains(&units[end - 1]) {
            end += 1;
        }
        out.extend(
            char::decode_utf16(units[start..end].iter().copied())
                .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
        start = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Héllo worlᴅ! 😁";

    #[test]
    fn test_byte_length_utf8_and_utf16() {
        assert_eq!(byte_length(SAMPLE, Encoding::Utf8), 20);
        assert_eq!(byte_length(SAMPLE, Encoding::Utf16Le), 30);
        assert_eq!(encode(SAMPLE, Encoding::Utf8).unwrap().len(), 20);
        assert_eq!(encode(SAMPLE, Encoding::Utf16Le).unwrap().len(), 30);
    }

    #[test]
    fn test_byte_length_single_byte_encodings() {
        assert_eq!(byte_length("Héllo, world!", Encoding::Ascii), 13);
        assert_eq!(byte_length("Héllo, world!", Encoding::Latin1), 13);
        assert_eq!(byte_length("3lNtsw==", Encoding::Base64), 4);
        assert_eq!(byte_length("0011", Encoding::Hex), 2);
        assert_eq!(byte_length("éé", Encoding::Hex), 1);
        assert_eq!(byte_length("😁", Encoding::Hex), 1);
    }

    #[test]
    fn test_base64_padding_counted_at_most_twice() {
        assert_eq!(byte_length("AAAA===", Encoding::Base64), 3);
        assert_eq!(byte_length("", Encoding::Base64), 0);
    }

    #[test]
    fn test_latin1_truncates_wide_code_units() {
        assert_eq!(encode("\u{0141}A", Encoding::Latin1).unwrap(), vec![0x41, 0x41]);
        assert_eq!(decode(&[0xe9, 0x41], Encoding::Latin1), "éA");
    }

    #[test]
    fn test_ascii_masks_high_bit_on_decode() {
        assert_eq!(decode(&[0xc8, 0x65, 0x6c], Encoding::Ascii), "Hel");
    }

    #[test]
    fn test_utf16_keeps_every_code_unit() {
        let bytes = encode("a😁", Encoding::Utf16Le).unwrap();
        assert_eq!(bytes, vec![0x61, 0x00, 0x3d, 0xd8, 0x01, 0xde]);
        assert_eq!(decode(&bytes, Encoding::Utf16Le), "a😁");
        // odd trailing byte is ignored
        assert_eq!(decode(&[0x61, 0x00, 0x62], Encoding::Utf16Le), "a");
    }

    #[test]
    fn test_base64_lenient_decode() {
        assert_eq!(encode("RWA=", Encoding::Base64).unwrap(), vec![69, 96]);
        assert_eq!(encode("AQI=", Encoding::Base64).unwrap(), vec![1, 2]);
        // non-canonical trailing bits are accepted
        assert_eq!(encode("AQZ=", Encoding::Base64).unwrap(), vec![1, 6]);
        assert_eq!(encode("AQ I\n=", Encoding::Base64).unwrap(), vec![1, 2]);
        assert_eq!(decode(&[0xde, 0x53, 0x6d, 0xb3], Encoding::Base64), "3lNtsw==");
    }

    #[test]
    fn test_hex() {
        assert_eq!(encode("00ff10", Encoding::Hex).unwrap(), vec![0x00, 0xff, 0x10]);
        assert_eq!(encode("0zff1", Encoding::Hex).unwrap(), vec![0x00, 0xff]);
        assert_eq!(decode(&[0x00, 0x0f, 0xab], Encoding::Hex), "000fab");
    }

    #[test]
    fn test_hex_pairs_keep_leading_digits() {
        assert_eq!(encode("1z", Encoding::Hex).unwrap(), vec![0x01]);
        assert_eq!(encode("z1", Encoding::Hex).unwrap(), vec![0x00]);
        assert_eq!(encode(" f-1+a", Encoding::Hex).unwrap(), vec![0x0f, 0xff, 0x0a]);
        assert_eq!(encode("FfaB", Encoding::Hex).unwrap(), vec![0xff, 0xab]);
    }

    #[test]
    fn test_hex_measures_code_units() {
        for input in ["éé", "é1f", "😁", "0a😁"] {
            assert_eq!(
                encode(input, Encoding::Hex).unwrap().len(),
                byte_length(input, Encoding::Hex),
                "{}",
                input
            );
        }
        assert_eq!(encode("éé", Encoding::Hex).unwrap(), vec![0x00]);
    }

    #[test]
    fn test_long_inputs_are_chunked_without_splitting_pairs() {
        let mut text = "a".repeat(MAX_CHAR_CODE_CHUNK - 1);
        text.push('😁');
        text.push_str(&"b".repeat(MAX_CHAR_CODE_CHUNK + 3));
        let bytes = encode(&text, Encoding::Utf16Le).unwrap();
        assert_eq!(decode(&bytes, Encoding::Utf16Le), text);

        let latin = vec![0xe9u8; MAX_CHAR_CODE_CHUNK * 2 + 7];
        let decoded = decode(&latin, Encoding::Latin1);
        assert_eq!(decoded.chars().count(), latin.len());
        assert!(decoded.chars().all(|c| c == 'é'));
    }
}
