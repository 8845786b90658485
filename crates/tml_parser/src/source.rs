//! Line based reading with a single line of pushback.
//!
//! The extractors stop on the first line which isn't part of a description, but that line still
//! needs to be seen by whatever reads the stream next. Rather than seeking the underlying reader,
//! a line can be handed back to the [`LineSource`], and it will be returned again by the next
//! read.

use std::io::BufRead;

use tracing::instrument;

use crate::error::Result;

/// A line reader which can un-read one line
///
/// Lines are returned without their terminator. Both `\n` and `\r\n` endings are stripped. Bytes
/// which aren't valid UTF-8 are replaced rather than failing the parse.
pub struct LineSource<R> {
    reader: R,
    pushed_back: Option<String>,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            pushed_back: None,
            buffer: Vec::new(),
            line_number: 0,
        }
    }

    /// Read the next line, or `None` at the end of the stream.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pushed_back.take() {
            self.line_number += 1;
            return Ok(Some(line));
        }

        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        self.line_number += 1;
        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }

    /// Hand a line back, so that it's returned by the next call to [`LineSource::next_line`].
    ///
    /// # Panics
    ///
    /// Only a single line may be pushed back at a time.
    #[instrument(level = "trace", skip(self))]
    pub fn push_back(&mut self, line: String) {
        assert!(
            self.pushed_back.is_none(),
            "only one line may be pushed back at once"
        );
        self.line_number = self.line_number.saturating_sub(1);
        self.pushed_back = Some(line);
    }

    /// Look at the next line without consuming it.
    pub fn peek_line(&mut self) -> Result<Option<&str>> {
        if self.pushed_back.is_none() {
            if let Some(line) = self.next_line()? {
                self.push_back(line);
            }
        }
        Ok(self.pushed_back.as_deref())
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::LineSource;
    use crate::error::Result;

    #[test]
    fn strips_line_endings() -> Result<()> {
        let mut source = LineSource::new(Cursor::new("one\r\ntwo\nthree"));

        assert_eq!(source.next_line()?.as_deref(), Some("one"));
        assert_eq!(source.next_line()?.as_deref(), Some("two"));
        assert_eq!(source.next_line()?.as_deref(), Some("three"));
        assert_eq!(source.next_line()?, None);
        assert_eq!(source.next_line()?, None);

        Ok(())
    }

    #[test]
    fn keeps_blank_lines() -> Result<()> {
        let lines = LineSource::new(Cursor::new("a\n\n\nb\n")).collect::<Result<Vec<_>>>()?;

        assert_eq!(lines, vec!["a", "", "", "b"]);

        Ok(())
    }

    #[test]
    fn pushed_back_line_is_read_again() -> Result<()> {
        let mut source = LineSource::new(Cursor::new("first\nsecond\n"));

        let line = source.next_line()?.unwrap_or_default();
        assert_eq!(source.line_number(), 1);

        source.push_back(line);
        assert_eq!(source.line_number(), 0);

        assert_eq!(source.next_line()?.as_deref(), Some("first"));
        assert_eq!(source.next_line()?.as_deref(), Some("second"));
        assert_eq!(source.line_number(), 2);

        Ok(())
    }

    #[test]
    fn peek_does_not_consume() -> Result<()> {
        let mut source = LineSource::new(Cursor::new("<BLCMM v=\"1\">\n"));

        assert_eq!(source.peek_line()?, Some("<BLCMM v=\"1\">"));
        assert_eq!(source.peek_line()?, Some("<BLCMM v=\"1\">"));
        assert_eq!(source.next_line()?.as_deref(), Some("<BLCMM v=\"1\">"));
        assert_eq!(source.peek_line()?, None);

        Ok(())
    }

    #[test]
    fn invalid_utf8_is_replaced() -> Result<()> {
        let mut source = LineSource::new(Cursor::new(b"caf\xe9\n".to_vec()));

        assert_eq!(source.next_line()?.as_deref(), Some("caf\u{FFFD}"));

        Ok(())
    }
}
