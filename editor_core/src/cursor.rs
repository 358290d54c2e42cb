//! Cursor and selection handling.

use crate::buffer::TextBuffer;
use crate::error::EditorError;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Represents a position in the buffer as (line, column).
/// Both are 0-indexed; the column counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Parses `LINE:COL`, both 0-indexed.
impl FromStr for Position {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidPosition(s.to_string());
        let (line, col) = s.trim().split_once(':').ok_or_else(invalid)?;
        let line = line.parse().map_err(|_| invalid())?;
        let col = col.parse().map_err(|_| invalid())?;
        Ok(Self::new(line, col))
    }
}

/// A single selection range with an anchor and a head.
/// When anchor == head, the range is a bare cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    /// The anchor point (where selection started).
    pub anchor: Position,
    /// The head (where the caret is). May precede the anchor.
    pub head: Position,
}

impl SelectionRange {
    /// Creates a range from anchor to head.
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Creates an empty range at the given position.
    pub fn cursor(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Returns true if the range encloses no text.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns the start of the range in document order.
    pub fn from(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Returns the end of the range in document order.
    pub fn to(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Returns the inclusive span of lines the range touches.
    pub fn line_span(&self) -> RangeInclusive<usize> {
        self.from().line..=self.to().line
    }
}

/// The set of selection ranges in the buffer.
///
/// Always holds at least one range. The head of the primary range is "the
/// cursor" for operations that act on a single point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
    primary: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self::cursor(Position::default())
    }
}

impl Selection {
    /// Creates a cursor-only selection.
    pub fn cursor(pos: Position) -> Self {
        Self::single(SelectionRange::cursor(pos))
    }

    /// Creates a selection with one range.
    pub fn single(range: SelectionRange) -> Self {
        Self {
            ranges: vec![range],
            primary: 0,
        }
    }

    /// Creates a selection from several ranges, keeping their order.
    ///
    /// An empty list yields a cursor at the buffer start; an out-of-range
    /// primary index falls back to the last range.
    pub fn from_ranges(ranges: Vec<SelectionRange>, primary: usize) -> Self {
        if ranges.is_empty() {
            return Self::default();
        }
        let primary = primary.min(ranges.len() - 1);
        Self { ranges, primary }
    }

    /// Returns all ranges in their stored order.
    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    /// Returns the number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns the index of the primary range.
    pub fn primary_index(&self) -> usize {
        self.primary
    }

    /// Returns the primary range.
    pub fn primary(&self) -> SelectionRange {
        self.ranges[self.primary]
    }

    /// Returns the cursor position (head of the primary range).
    pub fn cursor_position(&self) -> Position {
        self.primary().head
    }

    /// Returns true if any range encloses text.
    pub fn something_selected(&self) -> bool {
        self.ranges.iter().any(|r| !r.is_empty())
    }

    /// Returns all cursor positions (range heads).
    pub fn heads(&self) -> Vec<Position> {
        self.ranges.iter().map(|r| r.head).collect()
    }

    /// Returns true if every range position lies inside the buffer.
    pub fn is_valid_for(&self, buffer: &TextBuffer) -> bool {
        self.ranges
            .iter()
            .all(|r| buffer.contains_position(r.anchor) && buffer.contains_position(r.head))
    }

    /// Clamps every range to valid buffer bounds.
    pub fn clamp_to_buffer(&mut self, buffer: &TextBuffer) {
        for range in &mut self.ranges {
            range.anchor = buffer.clamp_position(range.anchor);
            range.head = buffer.clamp_position(range.head);
        }
    }

    /// Sorts ranges by position and merges overlapping ones.
    /// The primary index follows its range.
    pub fn normalize(&mut self) {
        if self.ranges.len() <= 1 {
            return;
        }

        let primary_range = self.ranges[self.primary];
        self.ranges.sort_by_key(|r| r.from());
        self.primary = self
            .ranges
            .iter()
            .position(|r| *r == primary_range)
            .unwrap_or(0);

        let mut i = 0;
        while i + 1 < self.ranges.len() {
            let a = self.ranges[i];
            let b = self.ranges[i + 1];

            // Touching cursors collapse too, so no two edits share a position
            if a.to() >= b.from() {
                let from = a.from().min(b.from());
                let to = a.to().max(b.to());
                let backward = a.head < a.anchor;
                self.ranges[i] = if backward {
                    SelectionRange::new(to, from)
                } else {
                    SelectionRange::new(from, to)
                };
                self.ranges.remove(i + 1);

                if self.primary > i {
                    self.primary -= 1;
                }
            } else {
                i += 1;
            }
        }
    }
}
