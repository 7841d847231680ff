use crate::libflash::deck::{Deck, RawRow};
use crate::libflash::error::QuizError;
use crate::libflash::question::{draw, Question};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Issued by [`Session::begin_load`]; only the newest ticket may replace the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued after this one.
    Stale,
    Failed(QuizError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub expected: String,
    pub previous_score: u32,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: u32,
    pub correct: u32,
    pub best_streak: u32,
}

pub struct Session {
    deck: Option<Deck>,
    question: Option<Question>,
    score: u32,
    stats: SessionStats,
    choices: usize,
    issued: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(choices: usize) -> Self {
        Self::with_rng(choices, StdRng::from_os_rng())
    }

    /// Reproducible session, used by `--seed` and tests.
    pub fn with_seed(choices: usize, seed: u64) -> Self {
        Self::with_rng(choices, StdRng::seed_from_u64(seed))
    }

    fn with_rng(choices: usize, rng: StdRng) -> Self {
        Session {
            deck: None,
            question: None,
            score: 0,
            stats: SessionStats::default(),
            choices: choices.max(1),
            issued: 0,
            rng,
        }
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn choices(&self) -> usize {
        self.choices
    }

    /// Replaces the deck and draws the first question from it. On error the
    /// previous deck, question and score stay as they were. The score carries
    /// over on success too. Any load still in flight becomes stale.
    pub fn load_deck(&mut self, rows: Vec<RawRow>) -> Result<(), QuizError> {
        self.issued += 1;
        self.apply_rows(rows)
    }

    fn apply_rows(&mut self, rows: Vec<RawRow>) -> Result<(), QuizError> {
        let deck = Deck::load(rows)?;
        let question = draw(&deck, self.choices, &mut self.rng)?;
        info!("[Session] Loaded deck with {} cards.", deck.len());

        self.deck = Some(deck);
        self.question = Some(question);
        Ok(())
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        debug!("[Session] Issued load ticket {}", self.issued);
        LoadTicket(self.issued)
    }

    /// Applies a finished load unless a newer one has been issued since.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        rows: Result<Vec<RawRow>, QuizError>,
    ) -> LoadOutcome {
        if ticket.0 != self.issued {
            warn!(
                "[Session] Dropping load {} (latest is {})",
                ticket.0, self.issued
            );
            return LoadOutcome::Stale;
        }
        match rows.and_then(|rows| self.apply_rows(rows)) {
            Ok(()) => LoadOutcome::Applied,
            Err(err) => {
                warn!("[Session] Load {} failed: {}", ticket.0, err);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Scores `choice` against the current question and moves on to the next
    /// one. Returns `None` when no question is showing.
    pub fn submit_answer(&mut self, choice: &str) -> Option<Verdict> {
        let question = self.question.as_ref()?;
        let correct = question.is_correct(choice);
        let expected = question.card.object.clone();
        let previous_score = self.score;

        self.stats.answered += 1;
        if correct {
            self.score += 1;
            self.stats.correct += 1;
            self.stats.best_streak = self.stats.best_streak.max(self.score);
        } else {
            self.score = 0;
        }
        debug!("[Session] {:?} -> score {} -> {}", choice, previous_score, self.score);

        if let Some(deck) = &self.deck {
            match draw(deck, self.choices, &mut self.rng) {
                Ok(next) => self.question = Some(next),
                Err(err) => warn!("[Session] Cannot draw next question: {}", err),
            }
        }

        Some(Verdict {
            correct,
            expected,
            previous_score,
            score: self.score,
        })
    }
}
