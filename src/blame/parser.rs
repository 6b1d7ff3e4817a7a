use std::io::BufRead;
use std::sync::OnceLock;

use regex::Regex;

use super::error::{ParseError, ParseResult};
use super::types::{is_header_key, BlameDocument, BlameRecord, ACTUAL_LINE};

/// Parse `git blame --porcelain` output into a [`BlameDocument`].
///
/// The porcelain format looks like:
/// ```text
/// <40-char sha> <orig_line> <final_line> [<num_lines>]
/// author <name>
/// author-mail <<email>>
/// author-time <epoch>
/// author-tz <tz>
/// committer <name>
/// ...
/// summary <text>
/// filename <path>
/// \t<line content>
/// ```
///
/// Commit metadata is only printed the first time a commit appears, so later
/// records for the same commit often carry just the header and content line.
/// Every metadata key becomes a record field after [`normalize_key`].
///
/// Blamed files need not be UTF-8, so each line is decoded lossily and
/// invalid bytes become U+FFFD. Only a failing reader yields
/// [`ParseError::Read`].
pub fn parse_porcelain<R: BufRead>(mut reader: R) -> ParseResult<BlameDocument> {
    let mut scanner = PorcelainScanner::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        scanner.push_line(&String::from_utf8_lossy(trim_line_ending(&buf)))?;
    }
    Ok(scanner.finish())
}

/// Drop a trailing `\n`, then one trailing `\r`, which also covers a final
/// line that ends in a bare `\r`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse porcelain output that is already in memory.
pub fn parse_porcelain_str(input: &str) -> ParseResult<BlameDocument> {
    parse_porcelain(input.as_bytes())
}

/// Line-at-a-time reducer behind [`parse_porcelain`].
///
/// Holds at most one open record. A header line seals the open record and
/// starts the next one; [`finish`](Self::finish) seals whatever is still open.
#[derive(Debug, Default)]
pub struct PorcelainScanner {
    current: Option<BlameRecord>,
    sealed: Vec<BlameRecord>,
    line_no: usize,
}

impl PorcelainScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.line_no
    }

    /// Feed the next input line, without its line terminator.
    pub fn push_line(&mut self, line: &str) -> ParseResult<()> {
        self.line_no += 1;

        if let Some(caps) = header_regex().captures(line) {
            self.seal();
            self.current = Some(BlameRecord::new(&caps[1], &caps[2], &caps[3]));
            return Ok(());
        }

        let line_no = self.line_no;
        let Some(record) = self.current.as_mut() else {
            tracing::debug!(line = line_no, "porcelain line outside of any record");
            return Err(ParseError::Syntax { line: line_no });
        };

        if line.starts_with('\t') {
            record.set(ACTUAL_LINE, line);
            return Ok(());
        }

        match line.split_once(' ') {
            Some((key, value)) => {
                let key = normalize_key(key);
                if is_header_key(&key) {
                    tracing::debug!(
                        line = line_no,
                        key = %key,
                        "ignoring metadata that names a header field"
                    );
                } else {
                    record.set(key, value);
                }
                Ok(())
            }
            None => {
                tracing::debug!(line = line_no, "metadata line has no key/value separator");
                Err(ParseError::Syntax { line: line_no })
            }
        }
    }

    /// Seal the open record, if any, and return every record in input order.
    pub fn finish(mut self) -> BlameDocument {
        self.seal();
        tracing::debug!(
            records = self.sealed.len(),
            lines = self.line_no,
            "finished parsing porcelain blame"
        );
        BlameDocument {
            blame_lines: self.sealed,
        }
    }

    fn seal(&mut self) {
        if let Some(record) = self.current.take() {
            tracing::trace!(
                sha1 = record.sha1(),
                final_line = record.final_line_number(),
                "sealed blame record"
            );
            self.sealed.push(record);
        }
    }
}

/// Turn a raw metadata key into a field name.
///
/// Each character outside `[A-Za-z0-9]` becomes one `_`; runs are not merged.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Header lines carry the commit id and the original/final line numbers,
/// plus a hunk length on the first line of each hunk. The pattern is searched,
/// not anchored, and the hunk length is not captured.
fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"([a-fA-F0-9]{40}) ([0-9]+) ([0-9]+)").expect("header pattern is valid")
    })
}
