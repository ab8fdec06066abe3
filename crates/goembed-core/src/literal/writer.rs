//! Incremental literal encoding over [`std::io::Write`].

use super::{tokens, utf8_width, EncodeStats};
use std::io;

/// An [`io::Write`] adapter that encodes everything written through it
///
/// Writing a byte stream in any number of pieces produces the same literal
/// as [`encode`](super::encode) on the concatenated input. A UTF-8 sequence
/// split across two writes is held back until it is complete, so call
/// [`finish`](LiteralWriter::finish) at the end to emit any held bytes.
///
/// # Example
///
/// ```
/// use goembed_core::literal::LiteralWriter;
/// use std::io::Write;
///
/// let mut w = LiteralWriter::new(Vec::new());
/// w.write_all(&[0xE2, 0x82])?;
/// w.write_all(&[0xAC, b'\n'])?;
/// let (out, _stats) = w.finish()?;
/// assert_eq!(out, "€\\n".as_bytes());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct LiteralWriter<W: io::Write> {
    inner: W,
    pending: Vec<u8>,
    stats: EncodeStats,
}

impl<W: io::Write> LiteralWriter<W> {
    /// Creates a new literal writer over `inner`
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(4),
            stats: EncodeStats::default(),
        }
    }

    /// Counters for everything encoded so far
    pub fn stats(&self) -> EncodeStats {
        self.stats
    }

    /// Returns a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Encode any held-back bytes, flush, and return the underlying writer
    pub fn finish(mut self) -> io::Result<(W, EncodeStats)> {
        let pending = std::mem::take(&mut self.pending);
        self.encode_chunk(&pending)?;
        self.inner.flush()?;
        Ok((self.inner, self.stats))
    }

    fn encode_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        for token in tokens(data) {
            token.write_to(&mut self.inner)?;
            self.stats.record(&token);
        }
        Ok(())
    }
}

impl<W: io::Write> io::Write for LiteralWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let joined;
        let data: &[u8] = if self.pending.is_empty() {
            buf
        } else {
            let mut head = std::mem::take(&mut self.pending);
            head.extend_from_slice(buf);
            joined = head;
            &joined
        };

        let split = data.len() - incomplete_suffix_len(data);
        self.encode_chunk(&data[..split])?;
        self.pending.extend_from_slice(&data[split..]);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Length of a trailing UTF-8 sequence that is started but not complete
///
/// Returns 0 when the data ends on a sequence boundary or when the trailing
/// bytes can never form a valid sequence anyway.
fn incomplete_suffix_len(data: &[u8]) -> usize {
    for back in 1..=data.len().min(3) {
        let byte = data[data.len() - back];
        if (0x80..=0xBF).contains(&byte) {
            continue;
        }
        return match utf8_width(byte) {
            Some(width) if width > back => back,
            _ => 0,
        };
    }
    0
}
