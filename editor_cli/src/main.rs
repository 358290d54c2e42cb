//! Visual Markdown - apply formatting commands from the command line.
//!
//! Usage: visual-markdown FILE (--command NAME | --key CHORD) [OPTIONS]

mod cli;

use clap::Parser;
use cli::{Cli, Input, Request};
use std::fs;
use std::process;
use visual_markdown_core::{CommandOutcome, EditorConfig, Headless, Result, Session};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let request = Request::from_cli(cli)?;

    let config = match &request.config_path {
        Some(path) => {
            log::info!("Loading config: {}", path.display());
            EditorConfig::from_file(path)?
        }
        None => EditorConfig::default(),
    };

    let text = fs::read_to_string(&request.file)?;
    let mut session = Session::with_text(config, &text)?;

    // Positions from the command line may point past the file
    let mut selection = request.selection.clone();
    selection.clamp_to_buffer(session.buffer());
    session.set_selection(selection);

    let outcome = match request.input {
        Input::Command(command) => Some(session.execute(command, &mut Headless)),
        Input::Key(chord) => session.handle_key(&chord, &mut Headless),
    };
    match outcome {
        Some(CommandOutcome::Applied(action)) => log::info!("Applied {}", action),
        Some(CommandOutcome::Fullscreen(change)) => log::info!("Fullscreen: {:?}", change),
        None => log::warn!("No command bound to this key, file unchanged"),
    }
    log::info!("Cursor at {}", session.cursor());

    if request.in_place {
        session.buffer().save_to_file(&request.file)?;
        log::info!("Wrote {}", request.file.display());
    } else {
        print!("{}", session.text());
    }
    Ok(())
}
