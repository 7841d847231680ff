use crate::libflash::question::Question;
use crate::libflash::render::CardRenderer;
use crate::libflash::session::{LoadOutcome, Session, Verdict};
use crate::libflash::source::DeckSource;
use crate::Error;
use colored::Colorize;
use log::debug;
use std::io::{self, Write};

#[derive(Debug, PartialEq)]
pub enum Choice {
    Option(usize),
    OutOfRange(usize),
    Load(String),
    DontKnow,
    Quit,
}

impl Choice {
    pub fn from_str(choices_count: usize, input: &str) -> Choice {
        let input = input.trim();
        match input {
            "q" => Choice::Quit,
            _ if input.starts_with("l ") => Choice::Load(input[2..].trim().to_string()),
            input => match input.parse::<usize>() {
                Ok(num) if num == 0 || num > choices_count => Choice::OutOfRange(num),
                Ok(num) => Choice::Option(num - 1),
                Err(_) => Choice::DontKnow,
            },
        }
    }
}

/// Loads `source` into the session, printing what happened.
pub fn load_and_report(session: &mut Session, source: &DeckSource) -> bool {
    let ticket = session.begin_load();
    match session.finish_load(ticket, source.read()) {
        LoadOutcome::Applied => {
            let cards = session.deck().map_or(0, |deck| deck.len());
            println!(
                "{}",
                format!("Loaded {} cards from {}.", cards, source).bright_green()
            );
            true
        }
        LoadOutcome::Stale => false,
        LoadOutcome::Failed(err) => {
            println!("{}", format!("could not load deck: {}", err).bright_red());
            false
        }
    }
}

#[derive(Debug, PartialEq)]
enum Step {
    Answered(Option<Verdict>),
    Reloaded,
    Quit,
}

fn handle_choice(session: &mut Session, question: &Question, choice: Choice) -> Step {
    match choice {
        Choice::Option(num) => Step::Answered(session.submit_answer(&question.options[num])),
        Choice::OutOfRange(num) => {
            println!(
                "{}",
                format!(
                    "{} is not an option, there are only {}!",
                    num,
                    question.options.len()
                )
                .bright_red()
            );
            Step::Answered(session.submit_answer(""))
        }
        // objects are never empty, so this always counts as a miss
        Choice::DontKnow => Step::Answered(session.submit_answer("")),
        Choice::Load(location) => {
            load_and_report(session, &DeckSource::parse(&location));
            Step::Reloaded
        }
        Choice::Quit => Step::Quit,
    }
}

fn print_verdict(verdict: &Verdict) {
    if verdict.correct {
        println!(
            "{}",
            format!("Correct!: {} -> {}", verdict.previous_score, verdict.score).bright_green()
        );
    } else {
        println!(
            "{}",
            format!("Incorrect!: {} -> {}", verdict.previous_score, verdict.score).bright_red()
        );
        println!(
            "{}",
            format!("The correct answer was {:?}.", verdict.expected).green()
        );
    }
}

pub fn cli_loop<R: CardRenderer<String>>(
    session: &mut Session,
    renderer: &R,
    question_count: Option<u32>,
) -> Result<(), Error> {
    let mut idx: u32 = 0;
    while question_count.map_or(true, |count| idx < count) {
        let question = match session.current_question() {
            Some(question) => question.clone(),
            None => break,
        };
        idx += 1;

        let leading = match question_count {
            Some(count) => format!("{}/{}. ", idx, count),
            None => format!("{}. ", idx),
        };
        let indent = " ".repeat(leading.chars().count());
        println!(
            "{}{}",
            leading.cyan(),
            format!("Score: {}", session.score()).bold()
        );

        let mut face = String::new();
        renderer.render(&mut face, question.card.rank, question.card.suit);
        for line in face.lines() {
            println!("{}{}", indent, line);
        }
        for (i, option) in question.options.iter().enumerate() {
            println!("{}{}. {}", indent, format!("{}", i + 1).bold(), option);
        }

        print!(
            "{} ",
            format!(
                "Answer (1-{}, q to quit, l <file> to load another deck, anything else if you don't know):",
                question.options.len()
            )
            .cyan()
        );
        io::stdout().flush()?;
        let mut line = String::new();
        let choice = match io::stdin().read_line(&mut line)? {
            0 => Choice::Quit,
            _ => Choice::from_str(question.options.len(), &line),
        };
        debug!("choice: {:?}", choice);

        match handle_choice(session, &question, choice) {
            Step::Answered(Some(verdict)) => print_verdict(&verdict),
            Step::Answered(None) => {}
            Step::Reloaded => {
                idx -= 1;
                continue;
            }
            Step::Quit => {
                println!("{}", "Quitting Early!".cyan());
                break;
            }
        }
        println!();
    }

    let stats = session.stats();
    println!(
        "{}",
        format!(
            "==========> {}/{} correct, best streak {} <==========",
            stats.correct, stats.answered, stats.best_streak
        )
        .cyan()
    );
    Ok(())
}
