#![forbid(unsafe_code)]

//! Patch stream decoder.
//!
//! Consumes an incoming byte stream in arbitrarily split chunks and produces
//! an ordered sequence of raw JSON records, one per well-formed line.
//!
//! # Design
//!
//! Records are separated by line boundaries. A chunk boundary that falls
//! inside a record must not emit a partial record: the decoder buffers the
//! incomplete tail and prepends it to the next chunk. At end-of-stream any
//! non-empty buffered tail is parsed as a final record.
//!
//! Decoding failure on a single line is a soft failure — model output may be
//! truncated or contain stray tokens (markdown fences, prose) — so the line
//! is discarded, a [`Diagnostic::DecodeFailure`] is recorded, and decoding
//! continues. The session is never aborted from inside the decoder.
//!
//! # Resource bounds
//!
//! A stream that never emits a newline would otherwise buffer without limit,
//! so the decoder enforces a maximum buffered record length (default 1 MiB).
//! Once the limit is hit the current record is discarded with a diagnostic
//! and input is skipped until the next line boundary.

use genui_core::Diagnostic;
use memchr::memchr;
use serde_json::Value;
use tracing::{debug, warn};

/// Maximum bytes shown in a diagnostic excerpt.
const EXCERPT_LEN: usize = 80;

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum buffered length of a single record, in bytes.
    pub max_record_len: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_record_len: 1024 * 1024,
        }
    }
}

impl DecoderOptions {
    /// Override the maximum buffered record length.
    #[must_use]
    pub fn with_max_record_len(mut self, max_record_len: usize) -> Self {
        self.max_record_len = max_record_len;
        self
    }
}

/// Incremental newline-delimited JSON decoder.
///
/// One decoder serves one generation session; restart by constructing a new
/// decoder.
///
/// # Example
///
/// ```
/// use genui_stream::StreamDecoder;
///
/// let mut decoder = StreamDecoder::new();
/// // A record split across two chunks decodes exactly once.
/// let first = decoder.feed(br#"{"op":"set","pa"#);
/// assert!(first.is_empty());
/// let second = decoder.feed(b"th\":\"/root\",\"value\":\"main\"}\n");
/// assert_eq!(second.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
    /// Discarding an oversized record until the next line boundary.
    skipping: bool,
    options: DecoderOptions,
    diagnostics: Vec<Diagnostic>,
}

impl StreamDecoder {
    /// Create a decoder with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with explicit limits.
    #[must_use]
    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Feed one chunk of the incoming stream, returning every record whose
    /// terminating newline arrived within it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Value> {
        let mut records = Vec::new();
        let mut rest = chunk;
        while let Some(pos) = memchr(b'\n', rest) {
            self.accumulate(&rest[..pos]);
            rest = &rest[pos + 1..];
            self.flush_line(&mut records);
        }
        self.accumulate(rest);
        records
    }

    /// Flush the stream: any non-empty buffered tail is parsed as a final
    /// record (a well-formed last line does not need a trailing newline).
    pub fn finish(&mut self) -> Vec<Value> {
        let mut records = Vec::new();
        if !self.buffer.is_empty() || self.skipping {
            self.flush_line(&mut records);
        }
        records
    }

    /// Drain the diagnostics recorded so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Bytes currently buffered waiting for a line boundary.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn accumulate(&mut self, bytes: &[u8]) {
        if self.skipping {
            return;
        }
        if self.buffer.len() + bytes.len() > self.options.max_record_len {
            warn!(
                buffered = self.buffer.len(),
                limit = self.options.max_record_len,
                "record exceeds length limit, discarding until next line boundary"
            );
            self.diagnostics.push(Diagnostic::DecodeFailure {
                detail: format!(
                    "record longer than {} bytes discarded",
                    self.options.max_record_len
                ),
                excerpt: excerpt(&self.buffer),
            });
            self.buffer.clear();
            self.skipping = true;
        } else {
            self.buffer.extend_from_slice(bytes);
        }
    }

    fn flush_line(&mut self, records: &mut Vec<Value>) {
        if self.skipping {
            // The oversized record's diagnostic is already recorded.
            self.skipping = false;
            self.buffer.clear();
            return;
        }
        let line = self.buffer.trim_ascii();
        if line.is_empty() {
            self.buffer.clear();
            return;
        }
        match serde_json::from_slice::<Value>(line) {
            Ok(record) => records.push(record),
            Err(err) => {
                debug!(error = %err, "skipping undecodable line");
                self.diagnostics.push(Diagnostic::DecodeFailure {
                    detail: err.to_string(),
                    excerpt: excerpt(line),
                });
            }
        }
        self.buffer.clear();
    }
}

fn excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut out: String = text.chars().take(EXCERPT_LEN).collect();
    if text.chars().count() > EXCERPT_LEN {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_lines_decode_in_order() {
        let mut decoder = StreamDecoder::new();
        let records = decoder.feed(b"{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
        assert!(decoder.take_diagnostics().is_empty());
    }

    #[test]
    fn partial_record_waits_for_its_newline() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed(b"{\"a\"").is_empty());
        assert!(decoder.feed(b":1").is_empty());
        assert_eq!(decoder.feed(b"}\n"), vec![json!({"a": 1})]);
    }

    #[test]
    fn finish_parses_unterminated_tail() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed(b"{\"a\":1}").is_empty());
        assert_eq!(decoder.finish(), vec![json!({"a": 1})]);
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn malformed_line_is_skipped_with_diagnostic() {
        let mut decoder = StreamDecoder::new();
        let records = decoder.feed(b"```json\n{\"a\":1}\nnot json\n{\"b\":2}\n");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
        let diagnostics = decoder.take_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.code() == "decode_failure"));
    }

    #[test]
    fn blank_lines_and_crlf_tolerated() {
        let mut decoder = StreamDecoder::new();
        let records = decoder.feed(b"\n  \n{\"a\":1}\r\n");
        assert_eq!(records, vec![json!({"a": 1})]);
        assert!(decoder.take_diagnostics().is_empty());
    }

    #[test]
    fn oversized_record_discarded_until_boundary() {
        let mut decoder =
            StreamDecoder::with_options(DecoderOptions::default().with_max_record_len(16));
        let records = decoder.feed(b"{\"pad\":\"xxxxxxxxxxxxxxxxxxxxxxxx\"}\n{\"a\":1}\n");
        assert_eq!(records, vec![json!({"a": 1})]);
        let diagnostics = decoder.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), "decode_failure");
    }
}
