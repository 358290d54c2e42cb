//! Key chords and the bindings from chords to commands.

use crate::command::Command;
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Modifier keys held with a key press. `cmd` is the platform's primary
/// modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Modifiers {
    pub cmd: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// A printable key. Letters are stored uppercase.
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Space,
}

impl Key {
    fn named(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "enter" => Key::Enter,
            "tab" => Key::Tab,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "space" => Key::Space,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Escape => f.write_str("Esc"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Space => f.write_str("Space"),
        }
    }
}

/// A key together with its modifiers, e.g. `Cmd-Alt-H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyChord {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl KeyChord {
    pub fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// A key pressed without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(Modifiers::default(), key)
    }

    /// `Cmd` plus a character.
    pub fn cmd(c: char) -> Self {
        Self::new(
            Modifiers {
                cmd: true,
                ..Modifiers::default()
            },
            Key::Char(c.to_ascii_uppercase()),
        )
    }

    /// `Cmd-Alt` plus a character.
    pub fn cmd_alt(c: char) -> Self {
        let mut chord = Self::cmd(c);
        chord.modifiers.alt = true;
        chord
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (held, name) in [(m.cmd, "Cmd"), (m.ctrl, "Ctrl"), (m.alt, "Alt"), (m.shift, "Shift")] {
            if held {
                write!(f, "{}-", name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyChord {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EditorError::InvalidKeyChord(s.to_string());
        let text = s.trim();
        if text.is_empty() {
            return Err(invalid());
        }

        // A trailing "--" binds the minus key itself
        let (mods, key) = if let Some(mods) = text.strip_suffix("--") {
            (mods, "-")
        } else if text == "-" {
            ("", "-")
        } else {
            text.rsplit_once('-').unwrap_or(("", text))
        };

        let mut modifiers = Modifiers::default();
        for name in mods.split('-').filter(|name| !name.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "cmd" => modifiers.cmd = true,
                "ctrl" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return Err(invalid()),
            }
        }

        let key = match Key::named(key) {
            Some(key) => key,
            None => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_uppercase()),
                    _ => return Err(invalid()),
                }
            }
        };

        Ok(Self::new(modifiers, key))
    }
}

/// Maps key chords to commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: BTreeMap<KeyChord, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::standard()
    }
}

impl Keymap {
    /// Creates a keymap with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// The built-in bindings: the formatting shortcuts plus `Enter` for list
    /// continuation.
    pub fn standard() -> Self {
        let mut keymap = Self::extra_key_defaults();
        keymap.bind_formatting();
        keymap
    }

    /// The configured extra keys, with the formatting shortcuts bound over
    /// them. Only the `Enter` binding can be replaced from configuration.
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        let mut keymap = Self::extra_key_defaults().with_bindings(&config.widget.extra_keys)?;
        keymap.bind_formatting();
        Ok(keymap)
    }

    fn extra_key_defaults() -> Self {
        let mut keymap = Self::empty();
        keymap.bind(
            KeyChord::plain(Key::Enter),
            Command::NewlineAndIndentContinueMarkdownList,
        );
        keymap
    }

    fn bind_formatting(&mut self) {
        self.bind(KeyChord::cmd('H'), Command::Header1);
        self.bind(KeyChord::cmd_alt('H'), Command::Header2);
        self.bind(KeyChord::cmd('B'), Command::Bold);
        self.bind(KeyChord::cmd('I'), Command::Italicize);
        self.bind(KeyChord::cmd('\''), Command::Blockquote);
        self.bind(KeyChord::cmd_alt('L'), Command::OrderedList);
        self.bind(KeyChord::cmd('L'), Command::UnorderedList);
        self.bind(KeyChord::cmd_alt('I'), Command::Image);
        self.bind(KeyChord::cmd('A'), Command::Link);
    }

    /// Adds `(chord, command name)` pairs, replacing existing bindings.
    ///
    /// Fails on the first unparsable chord or unknown command name.
    pub fn with_bindings<I, K, V>(mut self, bindings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (chord, name) in bindings {
            let chord: KeyChord = chord.as_ref().parse()?;
            let command: Command = name.as_ref().parse()?;
            self.bind(chord, command);
        }
        Ok(self)
    }

    /// Binds a chord, returning the command it was bound to before.
    pub fn bind(&mut self, chord: KeyChord, command: Command) -> Option<Command> {
        self.bindings.insert(chord, command)
    }

    /// Removes a binding.
    pub fn unbind(&mut self, chord: &KeyChord) -> Option<Command> {
        self.bindings.remove(chord)
    }

    /// Returns the command bound to `chord`.
    pub fn lookup(&self, chord: &KeyChord) -> Option<Command> {
        self.bindings.get(chord).copied()
    }

    /// Returns every chord bound to `command`.
    pub fn chords_for(&self, command: Command) -> Vec<KeyChord> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == command)
            .map(|(chord, _)| *chord)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords() {
        assert_eq!("Cmd-B".parse::<KeyChord>().unwrap(), KeyChord::cmd('B'));
        assert_eq!("Cmd-Alt-H".parse::<KeyChord>().unwrap(), KeyChord::cmd_alt('H'));
        assert_eq!("cmd-b".parse::<KeyChord>().unwrap(), KeyChord::cmd('B'));
        assert_eq!("Cmd-'".parse::<KeyChord>().unwrap(), KeyChord::cmd('\''));
        assert_eq!(
            "Enter".parse::<KeyChord>().unwrap(),
            KeyChord::plain(Key::Enter)
        );

        let shift_tab = "Shift-Tab".parse::<KeyChord>().unwrap();
        assert!(shift_tab.modifiers.shift);
        assert_eq!(shift_tab.key, Key::Tab);

        let minus = "Ctrl--".parse::<KeyChord>().unwrap();
        assert!(minus.modifiers.ctrl);
        assert_eq!(minus.key, Key::Char('-'));
    }

    #[test]
    fn test_invalid_chords() {
        for text in ["", "Cmd-", "Hyper-B", "Cmd-BB", "Cmd-Alt-Bogus"] {
            let err = text.parse::<KeyChord>().unwrap_err();
            assert!(
                matches!(err, EditorError::InvalidKeyChord(_)),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_chord_display_round_trip() {
        for text in ["Cmd-Alt-H", "Cmd-'", "Enter", "Cmd-Ctrl-Alt-Shift-K", "Ctrl--"] {
            let chord: KeyChord = text.parse().unwrap();
            assert_eq!(chord.to_string(), text);
        }
    }

    #[test]
    fn test_standard_bindings() {
        let keymap = Keymap::standard();
        assert_eq!(keymap.len(), 10);
        assert_eq!(keymap.lookup(&KeyChord::cmd('H')), Some(Command::Header1));
        assert_eq!(keymap.lookup(&KeyChord::cmd_alt('H')), Some(Command::Header2));
        assert_eq!(keymap.lookup(&KeyChord::cmd('B')), Some(Command::Bold));
        assert_eq!(keymap.lookup(&KeyChord::cmd('I')), Some(Command::Italicize));
        assert_eq!(keymap.lookup(&KeyChord::cmd('\'')), Some(Command::Blockquote));
        assert_eq!(keymap.lookup(&KeyChord::cmd_alt('L')), Some(Command::OrderedList));
        assert_eq!(keymap.lookup(&KeyChord::cmd('L')), Some(Command::UnorderedList));
        assert_eq!(keymap.lookup(&KeyChord::cmd_alt('I')), Some(Command::Image));
        assert_eq!(keymap.lookup(&KeyChord::cmd('A')), Some(Command::Link));
        assert_eq!(
            keymap.lookup(&KeyChord::plain(Key::Enter)),
            Some(Command::NewlineAndIndentContinueMarkdownList)
        );
        assert_eq!(keymap.lookup(&KeyChord::cmd('Z')), None);
    }

    #[test]
    fn test_formatting_keys_win_over_extra_keys() {
        let config = EditorConfig::from_json(
            r#"{ "codemirror": { "extraKeys": { "Cmd-B": "italicize", "Cmd-K": "link" } } }"#,
        )
        .unwrap();

        let keymap = Keymap::from_config(&config).unwrap();
        assert_eq!(keymap.lookup(&KeyChord::cmd('B')), Some(Command::Bold));
        assert_eq!(keymap.lookup(&KeyChord::cmd('K')), Some(Command::Link));
        assert_eq!(
            keymap.chords_for(Command::Link),
            vec![KeyChord::cmd('A'), KeyChord::cmd('K')]
        );
        assert_eq!(keymap.len(), 11);
    }

    #[test]
    fn test_extra_keys_can_replace_enter() {
        let config = EditorConfig::from_json(
            r#"{ "codemirror": { "extraKeys": { "Enter": "bold" } } }"#,
        )
        .unwrap();
        let keymap = Keymap::from_config(&config).unwrap();
        assert_eq!(keymap.lookup(&KeyChord::plain(Key::Enter)), Some(Command::Bold));

        let keymap = Keymap::from_config(&EditorConfig::default()).unwrap();
        assert_eq!(keymap, Keymap::standard());
    }

    #[test]
    fn test_unregistered_action_fails_fast() {
        let err = Keymap::standard()
            .with_bindings([("Cmd-U", "underline")])
            .unwrap_err();
        assert!(matches!(err, EditorError::UnregisteredAction(ref name) if name == "underline"));

        let err = Keymap::standard()
            .with_bindings([("Cmd-", "bold")])
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidKeyChord(_)));
    }

    #[test]
    fn test_bind_and_unbind() {
        let mut keymap = Keymap::empty();
        assert!(keymap.is_empty());
        assert_eq!(keymap.bind(KeyChord::cmd('B'), Command::Bold), None);
        assert_eq!(
            keymap.bind(KeyChord::cmd('B'), Command::Italicize),
            Some(Command::Bold)
        );
        assert_eq!(keymap.unbind(&KeyChord::cmd('B')), Some(Command::Italicize));
        assert!(keymap.is_empty());
    }
}
