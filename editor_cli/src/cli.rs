use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use visual_markdown_core::{
    Command, EditorError, KeyChord, Position, Result, Selection, SelectionRange,
};

#[derive(Parser, Debug)]
#[command(name = "visual-markdown")]
#[command(about = "Apply Markdown formatting commands to a text file")]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["command", "key"])))]
pub struct Cli {
    /// File to format
    pub file: PathBuf,

    /// Command to run (e.g. bold, orderedList, header1)
    #[arg(long)]
    pub command: Option<String>,

    /// Key chord to press (e.g. Cmd-B, Enter)
    #[arg(long)]
    pub key: Option<String>,

    /// Cursor position (LINE:COL, zero-based)
    #[arg(long, conflicts_with = "selections")]
    pub cursor: Option<String>,

    /// Selected range (LINE:COL-LINE:COL); repeat for several ranges
    #[arg(long = "select")]
    pub selections: Vec<String>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the result back to FILE instead of printing it
    #[arg(long)]
    pub in_place: bool,
}

/// What to feed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Key(KeyChord),
}

/// Validated command-line request.
#[derive(Debug, Clone)]
pub struct Request {
    pub file: PathBuf,
    pub input: Input,
    pub selection: Selection,
    pub config_path: Option<PathBuf>,
    pub in_place: bool,
}

impl Request {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let input = match &cli.key {
            Some(chord) => Input::Key(chord.parse()?),
            None => Input::Command(cli.command.as_deref().unwrap_or_default().parse()?),
        };

        let selection = if cli.selections.is_empty() {
            let pos = match &cli.cursor {
                Some(text) => text.parse()?,
                None => Position::default(),
            };
            Selection::cursor(pos)
        } else {
            let ranges = cli
                .selections
                .iter()
                .map(|text| Self::parse_range(text))
                .collect::<Result<Vec<_>>>()?;
            let primary = ranges.len() - 1;
            Selection::from_ranges(ranges, primary)
        };

        Ok(Self {
            file: cli.file.clone(),
            input,
            selection,
            config_path: cli.config.clone(),
            in_place: cli.in_place,
        })
    }

    fn parse_range(text: &str) -> Result<SelectionRange> {
        let (anchor, head) = text
            .split_once('-')
            .ok_or_else(|| EditorError::InvalidPosition(text.to_string()))?;
        Ok(SelectionRange::new(anchor.parse()?, head.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Request> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        Request::from_cli(&cli)
    }

    #[test]
    fn test_command_with_cursor() {
        let request = parse(&["visual-markdown", "notes.md", "--command", "bold", "--cursor", "2:4"]).unwrap();
        assert_eq!(request.file, PathBuf::from("notes.md"));
        assert_eq!(request.input, Input::Command(Command::Bold));
        assert_eq!(request.selection, Selection::cursor(Position::new(2, 4)));
        assert!(!request.in_place);
    }

    #[test]
    fn test_key_with_selections() {
        let request = parse(&[
            "visual-markdown",
            "notes.md",
            "--key",
            "Cmd-Alt-L",
            "--select",
            "0:0-0:5",
            "--select",
            "3:1-2:0",
            "--in-place",
        ])
        .unwrap();
        assert_eq!(request.input, Input::Key(KeyChord::cmd_alt('L')));
        assert_eq!(request.selection.len(), 2);
        assert_eq!(request.selection.primary_index(), 1);
        assert_eq!(request.selection.cursor_position(), Position::new(2, 0));
        assert!(request.in_place);
    }

    #[test]
    fn test_defaults_to_buffer_start() {
        let request = parse(&["visual-markdown", "notes.md", "--command", "line"]).unwrap();
        assert_eq!(request.selection, Selection::default());
        assert_eq!(request.config_path, None);
    }

    #[test]
    fn test_invalid_arguments() {
        let err = parse(&["visual-markdown", "f.md", "--command", "underline"]).unwrap_err();
        assert!(matches!(err, EditorError::UnregisteredAction(_)));

        let err = parse(&["visual-markdown", "f.md", "--command", "bold", "--cursor", "2"]).unwrap_err();
        assert!(matches!(err, EditorError::InvalidPosition(_)));

        let err = parse(&["visual-markdown", "f.md", "--command", "bold", "--select", "1:2"]).unwrap_err();
        assert!(matches!(err, EditorError::InvalidPosition(_)));

        let err = parse(&["visual-markdown", "f.md", "--key", "Hyper-X"]).unwrap_err();
        assert!(matches!(err, EditorError::InvalidKeyChord(_)));
    }

    #[test]
    fn test_clap_rejects_bad_combinations() {
        // Neither a command nor a key
        assert!(Cli::try_parse_from(["visual-markdown", "f.md"]).is_err());
        assert!(Cli::try_parse_from(["visual-markdown", "f.md", "--command", "bold", "--key", "Cmd-B"]).is_err());
        assert!(Cli::try_parse_from([
            "visual-markdown",
            "f.md",
            "--command",
            "bold",
            "--cursor",
            "0:0",
            "--select",
            "0:0-0:1",
        ])
        .is_err());
    }
}
