//! Visual Markdown Core - Markdown formatting for plain-text fields.
//!
//! This crate holds the document, selection and formatting behavior without
//! any dependency on a widget toolkit. A host drives a [`Session`] with
//! commands or key chords and renders the result.

pub mod action;
pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
pub mod error;
pub mod format;
pub mod fullscreen;
pub mod keymap;
pub mod session;
pub mod toolbar;

pub use action::{Action, HeaderLevel};
pub use buffer::TextBuffer;
pub use command::Command;
pub use config::{EditorConfig, WidgetOptions};
pub use cursor::{Position, Selection, SelectionRange};
pub use error::{EditorError, Result};
pub use fullscreen::{toggle_fullscreen, FullscreenChange, FullscreenHost, Headless};
pub use keymap::{Key, KeyChord, Keymap, Modifiers};
pub use session::{CommandOutcome, Session};
pub use toolbar::{ToolButton, Toolbar, ToolbarItem};
