use colored::Colorize;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use thiserror::Error;

use clap::{Parser, Subcommand};
#[allow(dead_code)]
mod libflash;
use crate::libflash::deck::{Deck, DeckEntry};
use crate::libflash::error::QuizError;
use crate::libflash::source::DeckSource;

#[derive(Parser, Debug)]
#[command(name = "deckctl")]
#[command(version, about = "Checks and exports Flash Cards! decks", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a deck and list its cards
    Check { deck: String },
    /// Write a deck as JSON
    Export {
        deck: String,
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Deck(#[from] QuizError),
    #[error("cannot encode deck: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn open(location: &str) -> Result<Deck, Error> {
    let source = DeckSource::parse(location);
    info!("{}", format!("Reading deck from {}", source).cyan());
    Ok(Deck::load(source.read()?)?)
}

fn check(location: &str) -> Result<(), Error> {
    let deck = open(location)?;
    info!("{}", format!("├ Deck: {} ({} Cards)", location, deck.len()).blue());
    for DeckEntry { rank, suit, object } in deck.entries() {
        info!(
            "{} {}",
            "│".blue(),
            format!("├ {} of {} → {}", rank, suit, object).green()
        );
    }
    if deck.is_empty() {
        error!("{}", "└ ✘ Deck has no cards, there is nothing to quiz on!".red());
        return Err(Error::Deck(QuizError::EmptyDeck));
    }
    Ok(())
}

fn export(location: &str, out: Option<PathBuf>) -> Result<(), Error> {
    let deck = open(location)?;
    let json = serde_json::to_string_pretty(&deck)?;
    match out {
        Some(path) => {
            std::fs::write(&path, json).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            info!("{}", format!("Wrote {} cards to {:?}", deck.len(), path).cyan());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let result = match args.command {
        Commands::Check { deck } => check(&deck),
        Commands::Export { deck, out } => export(&deck, out),
    };
    if let Err(err) = result {
        error!("{}", format!("{}!", err).red());
        std::process::exit(1);
    }
}
