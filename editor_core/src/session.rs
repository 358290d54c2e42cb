//! Editor session: one document, its selection and its configuration.

use crate::action::Action;
use crate::buffer::TextBuffer;
use crate::command::Command;
use crate::config::EditorConfig;
use crate::cursor::{Position, Selection};
use crate::error::Result;
use crate::format;
use crate::fullscreen::{toggle_fullscreen, FullscreenChange, FullscreenHost};
use crate::keymap::{KeyChord, Keymap};
use crate::toolbar::Toolbar;

/// What running a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The buffer was edited by this action.
    Applied(Action),
    /// The fullscreen state was toggled (or could not be).
    Fullscreen(FullscreenChange),
}

/// The state behind one Markdown field.
#[derive(Debug, Clone)]
pub struct Session {
    /// The document text.
    buffer: TextBuffer,
    /// Current selection; its primary head is the cursor.
    selection: Selection,
    config: EditorConfig,
    keymap: Keymap,
    toolbar: Toolbar,
}

impl Session {
    /// Creates a session with an empty document.
    ///
    /// Fails if the configured extra keys name an unknown chord or command.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::with_text(config, "")
    }

    /// Creates a session over `text`, with the cursor at the start.
    pub fn with_text(config: EditorConfig, text: &str) -> Result<Self> {
        let keymap = Keymap::from_config(&config)?;
        let toolbar = Toolbar::from_config(&config);
        Ok(Self {
            buffer: TextBuffer::from_str(text),
            selection: Selection::default(),
            config,
            keymap,
            toolbar,
        })
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Returns the toolbar layout for this session's configuration.
    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// Returns the whole document.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Returns line `i` without its line break.
    pub fn line(&self, i: usize) -> Option<String> {
        self.buffer.line(i)
    }

    /// Returns the cursor (head of the primary range).
    pub fn cursor(&self) -> Position {
        self.selection.cursor_position()
    }

    /// Collapses the selection to a cursor at `pos`.
    pub fn set_cursor(&mut self, pos: Position) {
        self.set_selection(Selection::cursor(pos));
    }

    /// Replaces the selection. Positions past the buffer are clamped.
    pub fn set_selection(&mut self, selection: Selection) {
        debug_assert!(
            selection.is_valid_for(&self.buffer),
            "selection {:?} lies outside the buffer",
            selection
        );
        self.selection = selection;
        self.selection.clamp_to_buffer(&self.buffer);
    }

    // ==================== Text Editing ====================

    /// Replaces the text between `from` and `to` and places the cursor after
    /// the inserted text.
    pub fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let from = self.buffer.clamp_position(from);
        let to = self.buffer.clamp_position(to);
        let end = self.buffer.replace_range(text, from, to);
        self.selection = Selection::cursor(end);
    }

    /// Replaces every selected range with `text`.
    pub fn replace_selection(&mut self, text: &str) {
        self.selection = format::replace_selection(&mut self.buffer, &self.selection, text);
    }

    // ==================== Formatting ====================

    /// Runs one formatting action against the current selection.
    pub fn apply(&mut self, action: Action) {
        self.selection = action.apply(&mut self.buffer, &self.selection);
        log::debug!("Applied {} -> cursor at {}", action, self.cursor());
    }

    /// Runs a command, using `host` for the fullscreen toggle.
    pub fn execute<H: FullscreenHost + ?Sized>(
        &mut self,
        command: Command,
        host: &mut H,
    ) -> CommandOutcome {
        match command.action(&self.config) {
            Some(action) => {
                self.apply(action);
                CommandOutcome::Applied(action)
            }
            None => CommandOutcome::Fullscreen(toggle_fullscreen(host)),
        }
    }

    /// Runs the command bound to `chord`. Returns `None` for unbound keys,
    /// leaving the host to handle them.
    pub fn handle_key<H: FullscreenHost + ?Sized>(
        &mut self,
        chord: &KeyChord,
        host: &mut H,
    ) -> Option<CommandOutcome> {
        let command = self.keymap.lookup(chord)?;
        Some(self.execute(command, host))
    }
}
