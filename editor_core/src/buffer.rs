//! Line-addressed text buffer backed by ropey.

use crate::cursor::Position;
use ropey::Rope;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::{self, BufWriter};
use std::path::Path;

/// Rewrites `\r\n` and lone `\r` separators as `\n`.
///
/// The buffer only ever stores `\n`, so a stored line can never carry an
/// embedded separator.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// The document being edited, as an ordered sequence of lines.
///
/// There is always at least one line; an empty buffer is a single empty line.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl TextBuffer {
    /// Creates an empty document: one empty line.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a document from field text, normalizing line breaks.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_line_endings(text)),
        }
    }

    /// Creates a document by joining `lines` with `\n`.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_str(&joined)
    }

    /// Reads a Markdown file. `\r\n` and `\r` become `\n`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_str(&text))
    }

    /// Writes the document back out with `\n` line breaks.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.rope.write_to(&mut writer)?;
        Ok(())
    }

    /// Document length in chars; the unit of every offset here.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines. Never zero.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Inserts `text` at `char_idx` (clamped to the end) and returns how many
    /// chars went in once line breaks were normalized.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> usize {
        let text = normalize_line_endings(text);
        if text.is_empty() {
            return 0;
        }
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, &text);
        text.chars().count()
    }

    /// Removes chars `start..end`; out-of-range bounds are clamped.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Maps a char offset to (line, col), clamping past the end.
    pub fn char_to_position(&self, char_idx: usize) -> Position {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        Position::new(line, char_idx - line_start)
    }

    /// Converts a position to a character index, clamping out-of-range
    /// lines and columns.
    pub fn position_to_char(&self, pos: Position) -> usize {
        if pos.line >= self.len_lines() {
            return self.len_chars();
        }
        let line_start = self.rope.line_to_char(pos.line);
        line_start + pos.col.min(self.line_len_chars(pos.line))
    }

    /// Length of a line in chars, without its `\n`. Zero for missing lines.
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let len = line_slice.len_chars();
        if len > 0 && line_slice.char(len - 1) == '\n' {
            return len - 1;
        }
        len
    }

    /// Char offset where markers are prefixed onto `line`.
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line)
        }
    }

    /// Char offset just before the line's `\n`.
    pub fn line_end(&self, line: usize) -> usize {
        if line >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line) + self.line_len_chars(line)
        }
    }

    /// The text of one line, as markers and list items are matched against.
    pub fn line(&self, line: usize) -> Option<String> {
        if line >= self.len_lines() {
            return None;
        }
        let mut s = self.rope.line(line).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len_lines()).filter_map(|i| self.line(i))
    }

    /// Returns the text between two positions, in document order.
    pub fn slice(&self, from: Position, to: Position) -> String {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let start = self.position_to_char(from);
        let end = self.position_to_char(to);
        self.rope.slice(start..end).to_string()
    }

    /// Replaces the text between `from` and `to` with `text`.
    ///
    /// Returns the position just past the inserted text.
    pub fn replace_range(&mut self, text: &str, from: Position, to: Position) -> Position {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let start = self.position_to_char(from);
        let end = self.position_to_char(to);
        self.remove(start, end);
        let inserted = self.insert(start, text);
        self.char_to_position(start + inserted)
    }

    /// Returns true if `pos` addresses an existing line and a column within it.
    pub fn contains_position(&self, pos: Position) -> bool {
        pos.line < self.len_lines() && pos.col <= self.line_len_chars(pos.line)
    }

    /// Clamps a position to the nearest valid one.
    pub fn clamp_position(&self, pos: Position) -> Position {
        let last_line = self.len_lines().saturating_sub(1);
        let line = pos.line.min(last_line);
        Position::new(line, pos.col.min(self.line_len_chars(line)))
    }
}
