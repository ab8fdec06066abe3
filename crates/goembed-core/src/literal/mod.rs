//! Go string literal encoding.
//!
//! This module turns an arbitrary byte sequence into the body of a Go
//! interpreted string literal (the text between the double quotes) whose
//! value is exactly those bytes.
//!
//! ## Escaping Rules
//!
//! Go accepts any character inside an interpreted string literal except a
//! newline and an unescaped double quote. Compilers may additionally reject
//! NUL and a byte order mark anywhere in the source, and the literal must be
//! valid UTF-8 text. The encoder therefore makes one decision per position:
//!
//! 1. `\` becomes `\\`
//! 2. `"` becomes `\"`
//! 3. a newline becomes `\n`
//! 4. NUL becomes `\x00`
//! 5. a complete UTF-8 sequence other than U+FEFF is copied through as-is
//! 6. anything else is escaped as `\xNN`, one byte at a time
//!
//! Rule 6 is what makes the encoder safe on binary data: invalid or truncated
//! sequences never reach the output raw. Escapes always cover a single byte;
//! valid multi-byte sequences are only ever passed through whole.
//!
//! The pure core is the [`Tokens`] iterator. [`encode`] and [`encode_to`]
//! render it, and [`LiteralWriter`] wraps it in an [`std::io::Write`] adapter
//! for callers that produce input incrementally.

mod decode;
mod writer;

use std::fmt;
use std::io;

pub use decode::decode;
pub use writer::LiteralWriter;

/// The byte order mark, disallowed by Go outside the start of a file
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// A single encoding decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A complete UTF-8 sequence copied through unescaped
    Text(&'a str),
    /// A fixed two-character escape (`\\`, `\"` or `\n`)
    Escape(&'static str),
    /// A single byte written as `\xNN`
    Hex(u8),
}

impl Token<'_> {
    /// Number of input bytes this token stands for
    pub fn input_len(&self) -> usize {
        match self {
            Token::Text(s) => s.len(),
            Token::Escape(_) | Token::Hex(_) => 1,
        }
    }

    /// Number of bytes this token occupies in the literal
    pub fn output_len(&self) -> usize {
        match self {
            Token::Text(s) => s.len(),
            Token::Escape(s) => s.len(),
            Token::Hex(_) => 4,
        }
    }

    /// Returns true if the token is an escape sequence
    pub fn is_escape(&self) -> bool {
        !matches!(self, Token::Text(_))
    }

    /// Write the token's literal text to an I/O writer
    pub fn write_to<W: io::Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        match self {
            Token::Text(s) => w.write_all(s.as_bytes()),
            Token::Escape(s) => w.write_all(s.as_bytes()),
            Token::Hex(_) => write!(w, "{}", self),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(s) => f.write_str(s),
            Token::Escape(s) => f.write_str(s),
            Token::Hex(b) => write!(f, "\\x{:02x}", b),
        }
    }
}

/// Counters collected during an encoding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Input bytes consumed
    pub consumed: usize,
    /// Literal bytes produced
    pub written: usize,
    /// Input bytes that had to be escaped
    pub escaped: usize,
}

impl EncodeStats {
    /// Account for one emitted token
    pub fn record(&mut self, token: &Token<'_>) {
        self.consumed += token.input_len();
        self.written += token.output_len();
        if token.is_escape() {
            self.escaped += 1;
        }
    }
}

/// Iterator over the encoding decisions for a byte slice
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Tokens<'a> {
    /// Creates a token iterator over `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of input bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.data[self.position..];
        let &byte = rest.first()?;

        let token = match byte {
            b'\\' => Token::Escape(r"\\"),
            b'"' => Token::Escape(r#"\""#),
            b'\n' => Token::Escape(r"\n"),
            0 => Token::Hex(0),
            _ => match decode_scalar(rest) {
                Some(s) if !s.starts_with(BYTE_ORDER_MARK) => Token::Text(s),
                _ => Token::Hex(byte),
            },
        };

        self.position += token.input_len();
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() - self.position;
        (remaining.div_ceil(4), Some(remaining))
    }
}

/// Returns the encoding decisions for `data`
pub fn tokens(data: &[u8]) -> Tokens<'_> {
    Tokens::new(data)
}

/// Encode `data` into a Go string literal body
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for token in tokens(data) {
        match token {
            Token::Text(s) => out.push_str(s),
            Token::Escape(s) => out.push_str(s),
            Token::Hex(_) => out.push_str(&token.to_string()),
        }
    }
    out
}

/// Encode `data` into `w`, returning what was consumed and produced
///
/// Tokens are written one at a time; wrap unbuffered writers in a
/// [`std::io::BufWriter`].
pub fn encode_to<W: io::Write + ?Sized>(data: &[u8], w: &mut W) -> io::Result<EncodeStats> {
    let mut stats = EncodeStats::default();
    for token in tokens(data) {
        token.write_to(w)?;
        stats.record(&token);
    }
    Ok(stats)
}

/// Expected length of a UTF-8 sequence from its lead byte
///
/// Returns `None` for continuation bytes and bytes that never start a valid
/// sequence (`0xC0`, `0xC1`, `0xF5..=0xFF`).
pub(crate) fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode the UTF-8 scalar at the start of `data`
fn decode_scalar(data: &[u8]) -> Option<&str> {
    let width = utf8_width(*data.first()?)?;
    let bytes = data.get(..width)?;
    std::str::from_utf8(bytes).ok()
}
