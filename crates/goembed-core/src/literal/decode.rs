//! Decoding of Go interpreted string literal bodies.
//!
//! This is the inverse of [`encode`](super::encode). It follows the Go
//! language rules for escapes inside double-quoted strings and also rejects
//! the characters a Go compiler would refuse in source text, which makes it
//! usable as a legality check on generated literals.

use crate::error::{Error, Result};

const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";

/// Decode the body of a Go interpreted string literal into its bytes
///
/// `literal` is the text between the double quotes, without the quotes.
pub fn decode(literal: &str) -> Result<Vec<u8>> {
    let bytes = literal.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let Some(&kind) = bytes.get(i + 1) else {
                    return Err(Error::invalid_literal(i, "trailing backslash"));
                };
                match kind {
                    b'\\' => out.push(b'\\'),
                    b'"' => out.push(b'"'),
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0C),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'v' => out.push(0x0B),
                    b'x' => {
                        let value = parse_digits(bytes, i + 2, 2, 16, i)?;
                        out.push(value as u8);
                        i += 4;
                        continue;
                    }
                    b'0'..=b'7' => {
                        let value = parse_digits(bytes, i + 1, 3, 8, i)?;
                        if value > 0xFF {
                            return Err(Error::invalid_literal(i, "octal escape value > 255"));
                        }
                        out.push(value as u8);
                        i += 4;
                        continue;
                    }
                    b'u' | b'U' => {
                        let count = if kind == b'u' { 4 } else { 8 };
                        let value = parse_digits(bytes, i + 2, count, 16, i)?;
                        let c = char::from_u32(value).ok_or_else(|| {
                            Error::invalid_literal(i, format!("invalid Unicode code point {:#x}", value))
                        })?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                        i += 2 + count;
                        continue;
                    }
                    other => {
                        return Err(Error::invalid_literal(
                            i,
                            format!("unknown escape sequence \\{}", other.escape_ascii()),
                        ));
                    }
                }
                i += 2;
            }
            b'\n' => return Err(Error::invalid_literal(i, "newline in string")),
            b'"' => return Err(Error::invalid_literal(i, "unescaped double quote")),
            0 => return Err(Error::invalid_literal(i, "NUL character in string")),
            _ if bytes[i..].starts_with(BOM_BYTES) => {
                return Err(Error::invalid_literal(i, "byte order mark in string"));
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(out)
}

/// Parse `count` digits in `radix` starting at `from`
///
/// `escape` is the offset of the escape's backslash, used for error reporting.
fn parse_digits(bytes: &[u8], from: usize, count: usize, radix: u32, escape: usize) -> Result<u32> {
    let digits = bytes
        .get(from..from + count)
        .ok_or_else(|| Error::invalid_literal(escape, "truncated escape sequence"))?;

    digits.iter().try_fold(0u32, |acc, &d| {
        let digit = (d as char)
            .to_digit(radix)
            .ok_or_else(|| Error::invalid_literal(escape, "invalid digit in escape sequence"))?;
        Ok(acc * radix + digit)
    })
}
