// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line folding for content lines.
//!
//! A logical `NAME:VALUE` line longer than the fold width is carried as
//! several physical lines; every physical line after the first starts with
//! a two-space continuation marker. Widths are counted in characters, so a
//! multi-byte character is never split.

use std::io::{self, BufRead, Write};
use std::mem;

use crate::error::CodecError;

/// Default maximum physical line width in characters, excluding CRLF.
pub const FOLD_WIDTH: usize = 78;

/// Marker that starts every continuation line.
pub const CONTINUATION: &str = "  ";

/// Smallest usable width: the marker plus one character of content.
pub(crate) const MIN_FOLD_WIDTH: usize = CONTINUATION.len() + 1;

const CRLF: &[u8] = b"\r\n";

/// Writes logical lines as folded, CRLF-terminated physical lines.
#[derive(Debug)]
pub struct LineFolder<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Maximum physical line width, excluding CRLF.
    width: usize,
}

impl<W: Write> LineFolder<W> {
    /// Create a new folder writing to `writer`.
    #[must_use]
    pub fn new(writer: W, width: usize) -> Self {
        Self {
            writer,
            width: width.max(MIN_FOLD_WIDTH),
        }
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this folder, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write one logical line, folding it if it reaches the width.
    ///
    /// The first physical line holds `width` characters, continuation lines
    /// hold the marker plus `width - 2` characters, so no physical line is
    /// wider than `width`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut rest = line;
        let mut budget = self.width;
        loop {
            let split = rest.char_indices().nth(budget).map_or(rest.len(), |(i, _)| i);
            let (chunk, tail) = rest.split_at(split);
            self.writer.write_all(chunk.as_bytes())?;
            self.writer.write_all(CRLF)?;

            if tail.is_empty() {
                return Ok(());
            }
            self.writer.write_all(CONTINUATION.as_bytes())?;
            rest = tail;
            budget = self.width - CONTINUATION.len();
        }
    }
}

/// A reassembled logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Physical line number where this logical line starts, 1-based.
    pub line: usize,
    /// The unfolded content, without line terminator.
    pub content: String,
}

#[derive(Debug)]
enum State {
    Idle,
    Accumulating { start: usize, buffer: String },
}

/// Reads physical lines and yields unfolded logical lines.
///
/// Lines may end with CRLF or a bare LF. Empty physical lines are skipped.
/// Iteration stops after the first error.
#[derive(Debug)]
pub struct LineUnfolder<R: BufRead> {
    reader: R,
    state: State,
    line_no: usize,
    raw: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineUnfolder<R> {
    /// Create a new unfolder reading from `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: State::Idle,
            line_no: 0,
            raw: Vec::new(),
            done: false,
        }
    }

    /// Read the next physical line, without its terminator.
    fn read_physical(&mut self) -> Result<Option<String>, CodecError> {
        self.raw.clear();
        if self.reader.read_until(b'\n', &mut self.raw)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        if self.raw.last() == Some(&b'\n') {
            self.raw.pop();
            if self.raw.last() == Some(&b'\r') {
                self.raw.pop();
            }
        }
        String::from_utf8(mem::take(&mut self.raw))
            .map(Some)
            .map_err(|_| CodecError::InvalidUtf8 { line: self.line_no })
    }

    /// Move to `next`, returning the buffered line if one was complete.
    fn dispatch(&mut self, next: State) -> Option<LogicalLine> {
        match mem::replace(&mut self.state, next) {
            State::Accumulating { start, buffer } if !buffer.is_empty() => Some(LogicalLine {
                line: start,
                content: buffer,
            }),
            _ => None,
        }
    }
}

impl<R: BufRead> Iterator for LineUnfolder<R> {
    type Item = Result<LogicalLine, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let physical = match self.read_physical() {
                Ok(Some(physical)) => physical,
                Ok(None) => {
                    self.done = true;
                    return self.dispatch(State::Idle).map(Ok);
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            if let Some(rest) = physical.strip_prefix(CONTINUATION) {
                match &mut self.state {
                    State::Accumulating { buffer, .. } => buffer.push_str(rest),
                    State::Idle => {
                        self.state = State::Accumulating {
                            start: self.line_no,
                            buffer: rest.to_owned(),
                        };
                    }
                }
                continue;
            }

            let next = if physical.is_empty() {
                State::Idle
            } else {
                State::Accumulating {
                    start: self.line_no,
                    buffer: physical,
                }
            };
            if let Some(line) = self.dispatch(next) {
                return Some(Ok(line));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(line: &str, width: usize) -> String {
        let mut folder = LineFolder::new(Vec::new(), width);
        folder.write_line(line).unwrap();
        String::from_utf8(folder.into_writer()).unwrap()
    }

    fn unfold(src: &str) -> Vec<LogicalLine> {
        LineUnfolder::new(src.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn contents(lines: &[LogicalLine]) -> Vec<&str> {
        lines.iter().map(|l| l.content.as_str()).collect()
    }

    #[test]
    fn short_line_unchanged() {
        assert_eq!(fold("SUMMARY:Test", FOLD_WIDTH), "SUMMARY:Test\r\n");
    }

    #[test]
    fn line_at_width_is_single_physical_line() {
        let line = "X".repeat(FOLD_WIDTH);
        assert_eq!(fold(&line, FOLD_WIDTH), format!("{line}\r\n"));
    }

    #[test]
    fn folds_after_width() {
        let line = "X".repeat(FOLD_WIDTH + 1);
        let folded = fold(&line, FOLD_WIDTH);
        assert_eq!(folded, format!("{}\r\n  X\r\n", "X".repeat(FOLD_WIDTH)));
    }

    #[test]
    fn physical_lines_respect_width() {
        for line in [
            format!("DESCRIPTION:{}", "a".repeat(500)),
            format!("DESCRIPTION:{}", "日".repeat(200)),
            format!("DESCRIPTION:{}", "é🎉x".repeat(97)),
        ] {
            let folded = fold(&line, FOLD_WIDTH);
            assert!(folded.ends_with("\r\n"));
            for physical in folded.split_terminator("\r\n") {
                assert!(
                    physical.chars().count() <= FOLD_WIDTH,
                    "too wide: {physical:?}"
                );
            }
            assert!(folded.matches("\r\n  ").count() >= 2);
        }
    }

    #[test]
    fn fold_then_unfold_restores_line() {
        for width in [MIN_FOLD_WIDTH, 10, FOLD_WIDTH] {
            let line = format!("COMMENT:{}", "ab  cd日本語 ".repeat(40));
            let lines = unfold(&fold(&line, width));
            assert_eq!(contents(&lines), [line.as_str()], "width {width}");
        }
    }

    #[test]
    fn unfolds_continuations() {
        let src = "BEGIN:VEVENT\r\nDESCRIPTION:abc\r\n  def\r\n  ghi\r\nEND:VEVENT\r\n";
        let lines = unfold(src);
        assert_eq!(
            contents(&lines),
            ["BEGIN:VEVENT", "DESCRIPTION:abcdefghi", "END:VEVENT"]
        );
        assert_eq!(
            lines.iter().map(|l| l.line).collect::<Vec<_>>(),
            [1, 2, 5]
        );
    }

    #[test]
    fn accepts_bare_lf_and_missing_final_terminator() {
        let lines = unfold("BEGIN:VEVENT\nSUMMARY:a\n  b\nEND:VEVENT");
        assert_eq!(contents(&lines), ["BEGIN:VEVENT", "SUMMARY:ab", "END:VEVENT"]);
    }

    #[test]
    fn skips_empty_lines() {
        let lines = unfold("\r\nSUMMARY:a\r\n\r\n\r\nUID:b\r\n\r\n");
        assert_eq!(contents(&lines), ["SUMMARY:a", "UID:b"]);
    }

    #[test]
    fn keeps_single_space_prefix() {
        let lines = unfold("SUMMARY:a\r\n b\r\n");
        assert_eq!(contents(&lines), ["SUMMARY:a", " b"]);
    }

    #[test]
    fn reports_invalid_utf8_with_line_number() {
        let src: &[u8] = b"SUMMARY:ok\r\nSUMMARY:\xff\xfe\r\nUID:x\r\n";
        let mut unfolder = LineUnfolder::new(src);
        assert!(matches!(
            unfolder.next(),
            Some(Err(CodecError::InvalidUtf8 { line: 2 }))
        ));
        assert!(unfolder.next().is_none());
    }
}
