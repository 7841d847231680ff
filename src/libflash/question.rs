use crate::libflash::deck::{Deck, DeckEntry};
use crate::libflash::error::QuizError;
use log::debug;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

pub const DEFAULT_CHOICES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub card: DeckEntry,
    pub options: Vec<String>,
}

impl Question {
    pub fn correct(&self) -> &str {
        &self.card.object
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|opt| *opt == self.card.object)
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.card.object
    }
}

/// Every object in the deck that differs from `correct`, without repeats,
/// in deck order.
pub fn distractor_pool<'a>(deck: &'a Deck, correct: &str) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(deck.len());
    let mut pool: Vec<&str> = Vec::new();
    for entry in deck.entries() {
        let object = entry.object.as_str();
        if object != correct && seen.insert(object) {
            pool.push(object);
        }
    }
    pool
}

/// Picks a random card and up to `choices` shuffled answers, one of them right.
pub fn draw<R: Rng + ?Sized>(deck: &Deck, choices: usize, rng: &mut R) -> Result<Question, QuizError> {
    let card = deck.entries().choose(rng).ok_or(QuizError::EmptyDeck)?;

    let mut distractors = distractor_pool(deck, &card.object);
    distractors.shuffle(rng);
    distractors.truncate(choices.saturating_sub(1));

    let mut options: Vec<String> = distractors.into_iter().map(str::to_string).collect();
    options.push(card.object.clone());
    options.shuffle(rng);

    debug!(
        "[Session] Drew {} of {} ({} options)",
        card.rank,
        card.suit,
        options.len()
    );
    Ok(Question {
        card: card.clone(),
        options,
    })
}
