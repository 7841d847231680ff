use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::{debug, warn};
use std::io;
use thiserror::Error;

mod cli;
mod libflash;

use crate::libflash::error::QuizError;
use crate::libflash::question::DEFAULT_CHOICES;
use crate::libflash::render::TerminalRenderer;
use crate::libflash::session::{LoadOutcome, Session};
use crate::libflash::source::DeckSource;

#[derive(Parser, Debug)]
#[command(name = "Flash Cards!")]
#[command(version, about, long_about = None)]
struct Args {
    /// Deck CSV to play, as a path or an http(s) URL
    #[arg(
        short,
        long,
        value_name = "FILE|URL",
        env = "FLASHCARDS_DECK",
        default_value = "cards.csv"
    )]
    deck: String,
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CHOICES as u32,
        value_parser = clap::value_parser!(u32).range(1..=8)
    )]
    choices_count: u32,
    /// Stop after this many questions (terminal mode only)
    #[arg(short, long)]
    question_count: Option<u32>,
    #[arg(short, long, default_value = "error")]
    log_level: String,
    /// Play in the terminal instead of opening a window
    #[arg(long)]
    text: bool,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not load deck: {0}")]
    Load(#[from] QuizError),
    #[error("cannot write to the terminal")]
    Io(#[from] io::Error),
    #[cfg(feature = "gui")]
    #[error("window failed: {0}")]
    Gui(#[from] eframe::Error),
}

cfg_if::cfg_if! {
    if #[cfg(feature = "gui")] {
        mod gui;

        fn run(args: &Args, session: Session, source: DeckSource) -> Result<(), Error> {
            if args.text {
                run_cli(args, session, source)
            } else {
                gui::init_gui(session, gui::EguiRenderer { size: 200.0 }, source)?;
                Ok(())
            }
        }
    } else {
        fn run(args: &Args, session: Session, source: DeckSource) -> Result<(), Error> {
            run_cli(args, session, source)
        }
    }
}

fn run_cli(args: &Args, mut session: Session, source: DeckSource) -> Result<(), Error> {
    let ticket = session.begin_load();
    match session.finish_load(ticket, source.read()) {
        LoadOutcome::Applied | LoadOutcome::Stale => {}
        LoadOutcome::Failed(err) => {
            warn!("[Setup] Cannot load {}: {}", source, err);
            println!(
                "{}",
                format!("Could not load a deck from {}. Check the file and try again!", source)
                    .yellow()
            );
            return Err(Error::Load(err));
        }
    }

    let cards = session.deck().map_or(0, |deck| deck.len());
    let title = match args.question_count {
        Some(count) => format!("==========> {} ({} cards, {} questions) <==========", source, cards, count),
        None => format!("==========> {} ({} cards) <==========", source, cards),
    };
    println!("{}", title.cyan());

    cli::cli_loop(&mut session, &TerminalRenderer::new(true), args.question_count)
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();
    debug!("[Setup] {:?}", args);

    let choices = args.choices_count as usize;
    let session = match args.seed {
        Some(seed) => Session::with_seed(choices, seed),
        None => Session::new(choices),
    };
    let source = DeckSource::parse(&args.deck);

    run(&args, session, source)
}
