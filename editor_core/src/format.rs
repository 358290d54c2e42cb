//! The Markdown formatting engine.
//!
//! Every operation edits the buffer in place and returns the selection the
//! host should show afterwards. None of them can fail. A selection that points
//! outside the buffer is a caller bug: it trips a debug assertion and is
//! clamped in release builds.

use crate::action::HeaderLevel;
use crate::buffer::{normalize_line_endings, TextBuffer};
use crate::cursor::{Position, Selection, SelectionRange};
use std::ops::RangeInclusive;

/// Returns a copy of `selection` that is guaranteed to fit `buffer`.
fn checked(buffer: &TextBuffer, selection: &Selection) -> Selection {
    debug_assert!(
        selection.is_valid_for(buffer),
        "selection {:?} lies outside the buffer",
        selection
    );
    let mut selection = selection.clone();
    selection.clamp_to_buffer(buffer);
    selection
}

/// Replacement of the chars `start..end`, in pre-edit char indices.
struct Splice {
    start: usize,
    end: usize,
    text: String,
}

impl Splice {
    fn new(start: usize, end: usize, text: &str) -> Self {
        Self {
            start,
            end,
            text: normalize_line_endings(text).into_owned(),
        }
    }

    fn covers(&self, other: &Splice) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Applies splices that are sorted by `start` and do not overlap.
///
/// Returns, for each splice, the char index just past its inserted text in the
/// edited buffer.
fn apply_splices(buffer: &mut TextBuffer, splices: &[Splice]) -> Vec<usize> {
    let mut ends = Vec::with_capacity(splices.len());
    let mut shift: isize = 0;
    for splice in splices {
        let inserted = splice.text.chars().count();
        let start = (splice.start as isize + shift) as usize;
        ends.push(start + inserted);
        shift += inserted as isize - (splice.end - splice.start) as isize;
    }

    // Back to front, so earlier indices stay valid
    for splice in splices.iter().rev() {
        buffer.remove(splice.start, splice.end);
        buffer.insert(splice.start, &splice.text);
    }
    ends
}

/// Inserts `text` at the cursor and moves the cursor past it.
///
/// Meant for a cursor-only selection. A non-empty selection is left in the
/// document; the text goes in at the head of the primary range.
pub fn insert_at_cursor(buffer: &mut TextBuffer, selection: &Selection, text: &str) -> Selection {
    let selection = checked(buffer, selection);
    let at = selection.cursor_position();
    Selection::cursor(buffer.replace_range(text, at, at))
}

/// Replaces every selected range with `text`, leaving a cursor after each
/// insertion.
pub fn replace_selection(buffer: &mut TextBuffer, selection: &Selection, text: &str) -> Selection {
    let mut selection = checked(buffer, selection);
    selection.normalize();
    let splices: Vec<Splice> = selection
        .ranges()
        .iter()
        .map(|range| {
            Splice::new(
                buffer.position_to_char(range.from()),
                buffer.position_to_char(range.to()),
                text,
            )
        })
        .collect();
    let cursors = apply_splices(buffer, &splices)
        .into_iter()
        .map(|end| SelectionRange::cursor(buffer.char_to_position(end)))
        .collect();
    Selection::from_ranges(cursors, selection.primary_index())
}

/// Surrounds the selected text with `prefix` and `suffix`.
///
/// With a selection, every range becomes `prefix + text + suffix` and the
/// cursor lands after the suffix. Without one, both markers are inserted at
/// the cursor and the cursor is placed between them.
pub fn wrap_selection(
    buffer: &mut TextBuffer,
    selection: &Selection,
    prefix: &str,
    suffix: &str,
) -> Selection {
    let mut selection = checked(buffer, selection);

    if !selection.something_selected() {
        let at = selection.cursor_position();
        let inner = buffer.replace_range(prefix, at, at);
        buffer.replace_range(suffix, inner, inner);
        return Selection::cursor(inner);
    }

    selection.normalize();
    let splices: Vec<Splice> = selection
        .ranges()
        .iter()
        .map(|range| {
            let text = buffer.slice(range.from(), range.to());
            Splice::new(
                buffer.position_to_char(range.from()),
                buffer.position_to_char(range.to()),
                &format!("{prefix}{text}{suffix}"),
            )
        })
        .collect();
    let ends = apply_splices(buffer, &splices);

    let suffix_len = normalize_line_endings(suffix).chars().count();
    let cursors = selection
        .ranges()
        .iter()
        .zip(ends)
        .map(|(range, end)| {
            // Bare cursors riding along with a real selection sit between the markers
            let at = if range.is_empty() { end - suffix_len } else { end };
            SelectionRange::cursor(buffer.char_to_position(at))
        })
        .collect();
    Selection::from_ranges(cursors, selection.primary_index())
}

/// Inserts `marker` at the start of every selected line.
///
/// Each range's line span is prefixed in the order the ranges are given, with
/// no check for an existing marker. The cursor ends on the first line of the
/// last span, at `cursor_offset` (clamped to the line).
pub fn prefix_lines(
    buffer: &mut TextBuffer,
    selection: &Selection,
    marker: &str,
    cursor_offset: usize,
) -> Selection {
    debug_assert!(
        !marker.contains(['\n', '\r']),
        "line marker {:?} contains a line break",
        marker
    );
    let selection = checked(buffer, selection);

    let spans: Vec<RangeInclusive<usize>> = if selection.something_selected() {
        selection.ranges().iter().map(SelectionRange::line_span).collect()
    } else {
        let line = selection.cursor_position().line;
        vec![line..=line]
    };

    let mut first_line = selection.cursor_position().line;
    for span in spans {
        for line in span.clone() {
            buffer.insert(buffer.line_start(line), marker);
        }
        first_line = *span.start();
    }

    let col = cursor_offset.min(buffer.line_len_chars(first_line));
    Selection::cursor(Position::new(first_line, col))
}

/// Adds or removes a heading marker on the cursor's line.
///
/// Only an exact `level` marker is removed. A line carrying another level gets
/// the new marker in front of the old one.
pub fn toggle_header(buffer: &mut TextBuffer, selection: &Selection, level: HeaderLevel) -> Selection {
    let selection = checked(buffer, selection);
    let cursor = selection.cursor_position();
    let prefix = format!("{} ", level.marker());
    let prefix_len = prefix.chars().count();
    let line = buffer.line(cursor.line).unwrap_or_default();

    if line.starts_with(&prefix) {
        let start = buffer.line_start(cursor.line);
        buffer.remove(start, start + prefix_len);
        Selection::cursor(Position::new(
            cursor.line,
            cursor.col.saturating_sub(prefix_len),
        ))
    } else {
        prefix_lines(buffer, &Selection::cursor(cursor), &prefix, prefix_len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bullet<'a> {
    Quote(&'a str),
    Unordered(char),
    Ordered(u64),
}

impl Bullet<'_> {
    /// The bullet for the item that follows this one.
    fn following(&self) -> String {
        match self {
            Bullet::Quote(run) => run.to_string(),
            Bullet::Unordered(c) => c.to_string(),
            Bullet::Ordered(n) => format!("{}.", n.saturating_add(1)),
        }
    }
}

/// A line that starts with a list or quote marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListItem<'a> {
    indent: &'a str,
    bullet: Bullet<'a>,
    spacing: &'a str,
    rest: &'a str,
}

impl<'a> ListItem<'a> {
    /// Matches leading whitespace, a bullet (`>` run, `*`, `+`, `-` or `N.`)
    /// and at least one whitespace character after it.
    fn parse(line: &'a str) -> Option<Self> {
        let body = line.trim_start();
        let indent = &line[..line.len() - body.len()];

        let (bullet, after_bullet) = if body.starts_with('>') {
            let run_len = body
                .find(|c: char| c != '>' && c != ' ')
                .unwrap_or(body.len());
            let run = body[..run_len].trim_end_matches(' ');
            (Bullet::Quote(run), &body[run.len()..])
        } else if let Some(c) = body.chars().next().filter(|c| matches!(c, '*' | '+' | '-')) {
            (Bullet::Unordered(c), &body[c.len_utf8()..])
        } else {
            let digits = body
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(body.len());
            if digits == 0 || !body[digits..].starts_with('.') {
                return None;
            }
            let number = body[..digits].parse().ok()?;
            (Bullet::Ordered(number), &body[digits + 1..])
        };

        let rest = after_bullet.trim_start();
        let spacing = &after_bullet[..after_bullet.len() - rest.len()];
        if spacing.is_empty() {
            return None;
        }

        Some(Self {
            indent,
            bullet,
            spacing,
            rest,
        })
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Builds the line break for one range.
fn list_break(buffer: &TextBuffer, range: &SelectionRange, plain: bool) -> Splice {
    let from = range.from();
    let start = buffer.position_to_char(from);
    let end = buffer.position_to_char(range.to());
    let line = buffer.line(from.line).unwrap_or_default();

    let indent: String = line
        .chars()
        .take(from.col)
        .take_while(|c| c.is_whitespace())
        .collect();
    let cursor_before_bullet = indent.chars().count() == from.col;
    let newline = Splice::new(start, end, &format!("\n{indent}"));
    if plain || cursor_before_bullet {
        return newline;
    }

    match ListItem::parse(&line) {
        None => newline,
        Some(item) if item.is_empty() => {
            // Enter on an empty item ends the list
            Splice::new(
                buffer.line_start(from.line),
                buffer.line_end(from.line),
                "\n",
            )
        }
        Some(item) => Splice::new(
            start,
            end,
            &format!("\n{}{}{}", item.indent, item.bullet.following(), item.spacing),
        ),
    }
}

/// Breaks the line at every cursor, carrying list and quote markers forward.
///
/// Ordered items count up, an empty item ends the list, and a selection is
/// replaced by a plain indented line break.
pub fn continue_list(buffer: &mut TextBuffer, selection: &Selection) -> Selection {
    let mut selection = checked(buffer, selection);
    selection.normalize();
    let plain = selection.something_selected();

    let mut splices: Vec<Splice> = Vec::with_capacity(selection.len());
    let mut primary = 0;
    for (i, range) in selection.ranges().iter().enumerate() {
        let splice = list_break(buffer, range, plain);
        // Clearing an empty item absorbs every other break on that line
        let mut absorbed = false;
        while let Some(prev) = splices.last() {
            if prev.covers(&splice) {
                absorbed = true;
                break;
            }
            if splice.start >= prev.end && !splice.covers(prev) {
                break;
            }
            splices.pop();
        }
        if !absorbed {
            splices.push(splice);
        }

        if i == selection.primary_index() || primary >= splices.len() {
            primary = splices.len() - 1;
        }
    }

    let cursors = apply_splices(buffer, &splices)
        .into_iter()
        .map(|end| SelectionRange::cursor(buffer.char_to_position(end)))
        .collect();
    Selection::from_ranges(cursors, primary)
}
