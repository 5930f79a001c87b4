//! Turnboard - command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{stdin, stdout};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use turnboard::{AppConfig, Cli, Command, SaveStore, TerminalConsole, play, resume};
use turnboard_engine::{LoopExit, Outcome};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so prompts on stdout stay readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::load_or_default(&cli.config)?);
    info!(?config, "Configuration resolved");

    match &cli.command {
        Command::Play { mode, size, .. } => {
            let console = TerminalConsole::new(stdin().lock(), stdout());
            report(play((*mode).into(), *size, &config, console)?);
            Ok(())
        }
        Command::Load { file } => {
            let saved = SaveStore::new(config.save_dir())
                .read(file)
                .with_context(|| format!("load failed: {}", file.display()))?;
            let console = TerminalConsole::new(stdin().lock(), stdout());
            report(resume(&saved, &config, console)?);
            Ok(())
        }
        Command::Saves => list_saves(&config),
    }
}

/// Prints the save files in the configured directory.
#[instrument(skip(config))]
fn list_saves(config: &AppConfig) -> Result<()> {
    let store = SaveStore::new(config.save_dir());
    let entries = store.list()?;
    if entries.is_empty() {
        println!("No saved games in {}", store.dir().display());
        return Ok(());
    }
    for entry in entries {
        let mode = entry
            .mode
            .map_or_else(|| "?".to_string(), |mode| mode.to_string());
        println!(
            "{}  {:<8} {}",
            entry.modified.format("%Y-%m-%d %H:%M:%S"),
            mode,
            entry.path.display()
        );
    }
    Ok(())
}

fn report(exit: LoopExit) {
    match exit {
        LoopExit::Finished(Outcome::Draw) => info!("Game finished in a draw"),
        LoopExit::Finished(Outcome::Winner(seat)) => info!(?seat, "Game finished"),
        LoopExit::Quit => println!("Goodbye."),
    }
}
