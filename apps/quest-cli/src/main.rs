//! # quest-cli
//!
//! Interactive menu-driven CLI for the Questline goal tracker.
//!
//! Runs a numbered menu over a single in-memory [`GoalTracker`]:
//! add/record/edit/delete/list/history/score/save/load/exit. Persistence
//! is explicit — nothing is written unless the user asks — and no
//! failure is fatal: errors are printed and the menu regains control.

mod input;
mod menu;

use std::path::PathBuf;

use clap::Parser;
use quest_goal::{GoalFile, GoalTracker, QuestError};
use tracing_subscriber::EnvFilter;

/// Questline — track simple, eternal, and checklist goals.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Snapshot file to preload and offer as the save/load default.
    #[arg(long, default_value = "goals.json")]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("quest_goal=warn".parse()?)
                .add_directive("quest_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let mut tracker = match GoalFile::new(&cli.file).load() {
        Ok(snapshot) => {
            if snapshot.skipped > 0 {
                println!("Skipped {} malformed record(s).", snapshot.skipped);
            }
            println!(
                "Loaded {} goal(s) from {}.",
                snapshot.tracker.len(),
                cli.file.display()
            );
            snapshot.tracker
        }
        Err(QuestError::NotFound { .. }) => {
            println!("No snapshot at {}; starting fresh.", cli.file.display());
            GoalTracker::new()
        }
        Err(err) => {
            println!("Could not load {}: {err}. Starting fresh.", cli.file.display());
            GoalTracker::new()
        }
    };

    menu::run(&mut tracker, &cli.file)
}
