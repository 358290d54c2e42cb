//! Formatting actions and the markers they insert.

use crate::buffer::TextBuffer;
use crate::cursor::Selection;
use crate::error::EditorError;
use crate::format;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const BOLD_MARKER: &str = "**";
pub const ITALIC_MARKER: &str = "*";
pub const LINK_PREFIX: &str = "[";
pub const LINK_SUFFIX: &str = "](http://)";
pub const CODE_FENCE_OPEN: &str = "```\n";
pub const CODE_FENCE_CLOSE: &str = "\n```";
pub const QUOTE_MARKER: &str = "> ";
pub const ORDERED_LIST_MARKER: &str = "1. ";
pub const UNORDERED_LIST_MARKER: &str = "* ";
pub const IMAGE_PLACEHOLDER: &str = "(image: filename.jpg)";
pub const HORIZONTAL_RULE: &str = "****";

/// Markdown heading level, `#` through `######`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HeaderLevel {
    #[default]
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeaderLevel {
    pub const ALL: [HeaderLevel; 6] = [
        HeaderLevel::H1,
        HeaderLevel::H2,
        HeaderLevel::H3,
        HeaderLevel::H4,
        HeaderLevel::H5,
        HeaderLevel::H6,
    ];

    /// Returns the numeric level, 1 through 6.
    pub fn level(self) -> u8 {
        match self {
            HeaderLevel::H1 => 1,
            HeaderLevel::H2 => 2,
            HeaderLevel::H3 => 3,
            HeaderLevel::H4 => 4,
            HeaderLevel::H5 => 5,
            HeaderLevel::H6 => 6,
        }
    }

    /// Returns the run of `#` characters for this level.
    pub fn marker(self) -> &'static str {
        &"######"[..self.level() as usize]
    }

    /// Returns the configuration label, `"h1"` through `"h6"`.
    pub fn label(self) -> &'static str {
        match self {
            HeaderLevel::H1 => "h1",
            HeaderLevel::H2 => "h2",
            HeaderLevel::H3 => "h3",
            HeaderLevel::H4 => "h4",
            HeaderLevel::H5 => "h5",
            HeaderLevel::H6 => "h6",
        }
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for HeaderLevel {
    type Error = EditorError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1..=6 => Ok(HeaderLevel::ALL[level as usize - 1]),
            _ => Err(EditorError::InvalidHeaderLevel(level.to_string())),
        }
    }
}

/// Parses the exact labels `h1` through `h6`.
impl FromStr for HeaderLevel {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderLevel::ALL
            .into_iter()
            .find(|level| level.label() == s)
            .ok_or_else(|| EditorError::InvalidHeaderLevel(s.to_string()))
    }
}

/// Configuration values other than the strings `h1`..`h6` fall back to `h1`.
impl<'de> Deserialize<'de> for HeaderLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let level = value.as_str().and_then(|label| label.parse::<HeaderLevel>().ok());
        Ok(level.unwrap_or_else(|| {
            log::warn!("Unknown header level {}, using h1", value);
            HeaderLevel::H1
        }))
    }
}

/// A Markdown formatting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Header(HeaderLevel),
    Bold,
    Italic,
    Blockquote,
    OrderedList,
    UnorderedList,
    Link,
    Image,
    HorizontalRule,
    CodeBlock,
    /// Line break that carries the current list or quote marker forward.
    ContinueList,
}

impl Action {
    /// Applies the action to `buffer` and returns the resulting selection.
    pub fn apply(self, buffer: &mut TextBuffer, selection: &Selection) -> Selection {
        match self {
            Action::Header(level) => format::toggle_header(buffer, selection, level),
            Action::Bold => format::wrap_selection(buffer, selection, BOLD_MARKER, BOLD_MARKER),
            Action::Italic => {
                format::wrap_selection(buffer, selection, ITALIC_MARKER, ITALIC_MARKER)
            }
            Action::Blockquote => format::prefix_lines(buffer, selection, QUOTE_MARKER, 2),
            Action::OrderedList => format::prefix_lines(buffer, selection, ORDERED_LIST_MARKER, 3),
            Action::UnorderedList => {
                format::prefix_lines(buffer, selection, UNORDERED_LIST_MARKER, 2)
            }
            Action::Link => format::wrap_selection(buffer, selection, LINK_PREFIX, LINK_SUFFIX),
            Action::Image => format::prefix_lines(buffer, selection, IMAGE_PLACEHOLDER, 0),
            Action::HorizontalRule => format::insert_at_cursor(buffer, selection, HORIZONTAL_RULE),
            Action::CodeBlock => {
                format::wrap_selection(buffer, selection, CODE_FENCE_OPEN, CODE_FENCE_CLOSE)
            }
            Action::ContinueList => format::continue_list(buffer, selection),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Header(level) => write!(f, "header({})", level),
            Action::Bold => f.write_str("bold"),
            Action::Italic => f.write_str("italic"),
            Action::Blockquote => f.write_str("blockquote"),
            Action::OrderedList => f.write_str("ordered list"),
            Action::UnorderedList => f.write_str("unordered list"),
            Action::Link => f.write_str("link"),
            Action::Image => f.write_str("image"),
            Action::HorizontalRule => f.write_str("horizontal rule"),
            Action::CodeBlock => f.write_str("code block"),
            Action::ContinueList => f.write_str("continue list"),
        }
    }
}
