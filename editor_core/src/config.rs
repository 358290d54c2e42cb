//! Editor configuration.
//!
//! The host passes a JSON options object. Every key is optional and unknown
//! keys are ignored.

use crate::action::HeaderLevel;
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Whether the toolbar is shown.
    pub toolbar: bool,
    /// Level used by the `header1` command.
    pub header1: HeaderLevel,
    /// Level used by the `header2` command.
    pub header2: HeaderLevel,
    /// Options handed through to the host text widget.
    #[serde(rename = "codemirror")]
    pub widget: WidgetOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            toolbar: true,
            header1: HeaderLevel::H1,
            header2: HeaderLevel::H2,
            widget: WidgetOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    pub theme: String,
    pub tab_size: usize,
    pub indent_with_tabs: bool,
    pub line_wrapping: bool,
    /// Additional key bindings, chord to command name. Merged over the
    /// standard bindings.
    pub extra_keys: BTreeMap<String, String>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            theme: "visualmarkdown".to_string(),
            tab_size: 4,
            indent_with_tabs: false,
            line_wrapping: true,
            extra_keys: BTreeMap::new(),
        }
    }
}
