//! Toolbar layout.
//!
//! Describes which buttons the host should draw and the command each one
//! runs. Building the actual widgets is left to the host.

use crate::command::Command;
use crate::config::EditorConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolButton {
    pub name: String,
    pub command: Command,
    /// Icon class names for the host's stylesheet.
    pub class_name: &'static str,
    /// Show `name` as the button label instead of an icon only.
    pub show_name: bool,
}

impl ToolButton {
    fn icon(name: &str, command: Command, class_name: &'static str) -> Self {
        Self {
            name: name.to_string(),
            command,
            class_name,
            show_name: false,
        }
    }

    fn labelled(name: &str, command: Command, class_name: &'static str) -> Self {
        Self {
            show_name: true,
            ..Self::icon(name, command, class_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarItem {
    Button(ToolButton),
    Divider,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Toolbar {
    items: Vec<ToolbarItem>,
}

impl Toolbar {
    /// Builds the toolbar for `config`. Empty when the toolbar is disabled.
    pub fn from_config(config: &EditorConfig) -> Self {
        if !config.toolbar {
            return Self::default();
        }

        use ToolbarItem::{Button, Divider};
        let items = vec![
            Button(ToolButton::labelled(
                config.header1.label(),
                Command::Header1,
                "markdownfield-icon-text markdownfield-icon-header1",
            )),
            Button(ToolButton::labelled(
                config.header2.label(),
                Command::Header2,
                // Both header buttons share one icon
                "markdownfield-icon-text markdownfield-icon-header1",
            )),
            Divider,
            Button(ToolButton::icon("bold", Command::Bold, "fa fa-bold")),
            Button(ToolButton::icon("italicize", Command::Italicize, "fa fa-italic")),
            Button(ToolButton::icon("blockquote", Command::Blockquote, "fa fa-quote-left")),
            Button(ToolButton::icon("unorderedList", Command::UnorderedList, "fa fa-list")),
            Button(ToolButton::icon("orderedList", Command::OrderedList, "fa fa-list-ol")),
            Divider,
            Button(ToolButton::icon("link", Command::Link, "fa fa-link")),
            Button(ToolButton::icon("image", Command::Image, "fa fa-image")),
            Button(ToolButton::icon("line", Command::Line, "fa fa-minus")),
            Button(ToolButton::icon("fullScreen", Command::Fullscreen, "fa fa-expand")),
        ];
        Self { items }
    }

    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    /// Returns the buttons, skipping dividers.
    pub fn buttons(&self) -> impl Iterator<Item = &ToolButton> {
        self.items.iter().filter_map(|item| match item {
            ToolbarItem::Button(button) => Some(button),
            ToolbarItem::Divider => None,
        })
    }

    /// Finds a button by name.
    pub fn button(&self, name: &str) -> Option<&ToolButton> {
        self.buttons().find(|button| button.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
