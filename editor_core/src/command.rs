//! Named editor commands, as referenced by key bindings and toolbar buttons.

use crate::action::Action;
use crate::config::EditorConfig;
use crate::error::EditorError;
use std::fmt;
use std::str::FromStr;

/// A user-facing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Header1,
    Header2,
    Bold,
    Italicize,
    Blockquote,
    OrderedList,
    UnorderedList,
    Link,
    Image,
    Line,
    Code,
    Fullscreen,
    NewlineAndIndentContinueMarkdownList,
}

impl Command {
    pub const ALL: [Command; 13] = [
        Command::Header1,
        Command::Header2,
        Command::Bold,
        Command::Italicize,
        Command::Blockquote,
        Command::OrderedList,
        Command::UnorderedList,
        Command::Link,
        Command::Image,
        Command::Line,
        Command::Code,
        Command::Fullscreen,
        Command::NewlineAndIndentContinueMarkdownList,
    ];

    /// Returns the name used in key bindings and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Command::Header1 => "header1",
            Command::Header2 => "header2",
            Command::Bold => "bold",
            Command::Italicize => "italicize",
            Command::Blockquote => "blockquote",
            Command::OrderedList => "orderedList",
            Command::UnorderedList => "unorderedList",
            Command::Link => "link",
            Command::Image => "image",
            Command::Line => "line",
            Command::Code => "code",
            Command::Fullscreen => "fullscreen",
            Command::NewlineAndIndentContinueMarkdownList => "newlineAndIndentContinueMarkdownList",
        }
    }

    /// Resolves the command to a formatting action.
    ///
    /// Header commands take their level from `config`. Returns `None` for
    /// commands that do not edit text.
    pub fn action(self, config: &EditorConfig) -> Option<Action> {
        let action = match self {
            Command::Header1 => Action::Header(config.header1),
            Command::Header2 => Action::Header(config.header2),
            Command::Bold => Action::Bold,
            Command::Italicize => Action::Italic,
            Command::Blockquote => Action::Blockquote,
            Command::OrderedList => Action::OrderedList,
            Command::UnorderedList => Action::UnorderedList,
            Command::Link => Action::Link,
            Command::Image => Action::Image,
            Command::Line => Action::HorizontalRule,
            Command::Code => Action::CodeBlock,
            Command::NewlineAndIndentContinueMarkdownList => Action::ContinueList,
            Command::Fullscreen => return None,
        };
        Some(action)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| EditorError::UnregisteredAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::HeaderLevel;

    #[test]
    fn test_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "strikethrough".parse::<Command>().unwrap_err();
        assert!(matches!(err, EditorError::UnregisteredAction(ref name) if name == "strikethrough"));
        assert_eq!(err.to_string(), "'strikethrough' is not a registered action");
        // Names are case sensitive
        assert!("Bold".parse::<Command>().is_err());
    }

    #[test]
    fn test_header_commands_follow_config() {
        let config = EditorConfig {
            header1: HeaderLevel::H3,
            header2: HeaderLevel::H4,
            ..EditorConfig::default()
        };
        assert_eq!(
            Command::Header1.action(&config),
            Some(Action::Header(HeaderLevel::H3))
        );
        assert_eq!(
            Command::Header2.action(&config),
            Some(Action::Header(HeaderLevel::H4))
        );
    }

    #[test]
    fn test_command_actions() {
        let config = EditorConfig::default();
        assert_eq!(Command::Italicize.action(&config), Some(Action::Italic));
        assert_eq!(Command::Line.action(&config), Some(Action::HorizontalRule));
        assert_eq!(Command::Code.action(&config), Some(Action::CodeBlock));
        assert_eq!(Command::Fullscreen.action(&config), None);
    }
}
