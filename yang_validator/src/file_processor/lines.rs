//! Physical line splitting
//!
//! A line ends at `\n`, `\r\n` or a lone `\r`. Terminators are not part of
//! the yielded line, and a trailing terminator does not produce an extra
//! empty line.

use std::io::{self, BufRead};

/// Iterator over the physical lines of in-memory text
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

/// Split `text` into physical lines
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Buffered reader yielding physical lines, decoded as UTF-8
#[derive(Debug)]
pub(crate) struct LineReader<R> {
    reader: R,
    // Previous line ended at `\r`; a following `\n` belongs to it
    after_cr: bool,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            after_cr: false,
        }
    }

    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();

        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                if bytes.is_empty() {
                    return Ok(None);
                }
                break;
            }

            if self.after_cr {
                self.after_cr = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    bytes.extend_from_slice(&available[..pos]);
                    self.after_cr = available[pos] == b'\r';
                    self.reader.consume(pos + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    bytes.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn read_all(bytes: &[u8], capacity: usize) -> Vec<String> {
        let mut reader = LineReader::new(BufReader::with_capacity(capacity, Cursor::new(bytes)));
        let mut lines = Vec::new();
        while let Some(line) = reader.read_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn splits_on_every_terminator() {
        let text = "a\r\nb\rc\n\nd";
        let lines: Vec<&str> = split_lines(text).collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
    }

    #[test]
    fn trailing_terminator_adds_no_line() {
        assert_eq!(split_lines("a\r").collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(split_lines("a\r\n").collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(split_lines("\r\r").collect::<Vec<_>>(), vec!["", ""]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn reader_matches_text_splitting() {
        let text = "module m {\r  prefix x;\r\n\r\n}\rtail";
        let expected: Vec<String> = split_lines(text).map(str::to_string).collect();

        // A tiny buffer forces `\r\n` pairs across refills
        for capacity in [1, 2, 3, 64] {
            assert_eq!(read_all(text.as_bytes(), capacity), expected);
        }
    }

    #[test]
    fn reader_rejects_invalid_utf8() {
        let mut reader = LineReader::new(Cursor::new(vec![b'm', 0xff, b'\n']));
        let err = reader.read_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
