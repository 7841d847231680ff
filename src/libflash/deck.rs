use crate::libflash::card::{Rank, Suit};
use crate::libflash::error::{QuizError, ValidationError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One untrusted record of a deck file (`suite,rank,object`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    pub suite: String,
    pub rank: String,
    pub object: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckEntry {
    pub rank: Rank,
    pub suit: Suit,
    pub object: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    entries: Vec<DeckEntry>,
}

impl RawRow {
    pub fn new(suite: &str, rank: &str, object: &str) -> Self {
        RawRow {
            suite: suite.to_string(),
            rank: rank.to_string(),
            object: object.to_string(),
        }
    }

    fn validate(self) -> Result<DeckEntry, ValidationError> {
        let rank = Rank::from_csv(&self.rank).ok_or(ValidationError::UnknownRank(self.rank))?;
        let suit = Suit::from_csv(&self.suite).ok_or(ValidationError::UnknownSuit(self.suite))?;
        if self.object.trim().is_empty() {
            return Err(ValidationError::EmptyObject);
        }

        Ok(DeckEntry {
            rank,
            suit,
            object: self.object,
        })
    }
}

impl DeckEntry {
    pub fn new(suit: Suit, rank: Rank, object: &str) -> Self {
        DeckEntry {
            rank,
            suit,
            object: object.to_string(),
        }
    }
}

impl Deck {
    pub fn new(entries: Vec<DeckEntry>) -> Self {
        Deck { entries }
    }

    /// Validates rows in source order. The first bad row aborts the load.
    pub fn load(rows: impl IntoIterator<Item = RawRow>) -> Result<Deck, QuizError> {
        let mut entries = Vec::new();
        for (idx, raw) in rows.into_iter().enumerate() {
            let row = idx + 1;
            match raw.validate() {
                Ok(entry) => entries.push(entry),
                Err(kind) => {
                    warn!("[Deck] Rejected row {}: {}", row, kind);
                    return Err(QuizError::Validation { row, kind });
                }
            }
        }
        debug!("[Deck] Loaded {} entries.", entries.len());

        Ok(Deck { entries })
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses deck text. A header row naming `suite`, `rank` and `object` is required.
pub fn read_rows(text: &str) -> Result<Vec<RawRow>, QuizError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let rows = reader
        .deserialize::<RawRow>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!("[Deck] Parsed {} rows.", rows.len());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_maps_rows_in_order() {
        let deck = Deck::load(vec![
            RawRow::new("Hearts", "1", "Lion"),
            RawRow::new("Spades", "King", "Tiger"),
            RawRow::new("Clubs", "10", "Lion"),
        ])
        .unwrap();

        assert_eq!(
            deck.entries(),
            &[
                DeckEntry::new(Suit::Hearts, Rank::Ace, "Lion"),
                DeckEntry::new(Suit::Spades, Rank::King, "Tiger"),
                DeckEntry::new(Suit::Clubs, Rank::Ten, "Lion"),
            ]
        );
    }

    #[test]
    fn load_accepts_every_rank_and_suit() {
        let ranks = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "Jack", "Queen", "King"];
        let rows = Suit::ALL.iter().flat_map(|suit| {
            ranks
                .iter()
                .map(move |rank| RawRow::new(suit.name(), rank, &format!("{rank} of {suit}")))
        });
        let deck = Deck::load(rows).unwrap();

        assert_eq!(deck.len(), 52);
        for (idx, entry) in deck.entries().iter().enumerate() {
            assert_eq!(entry.suit, Suit::ALL[idx / 13]);
            assert_eq!(entry.rank, Rank::ALL[idx % 13]);
        }
    }

    #[test]
    fn unknown_rank_names_the_row() {
        let err = Deck::load(vec![
            RawRow::new("Hearts", "1", "Lion"),
            RawRow::new("Hearts", "Knight", "Horse"),
        ])
        .unwrap_err();

        match err {
            QuizError::Validation { row, kind } => {
                assert_eq!(row, 2);
                assert_eq!(kind, ValidationError::UnknownRank("Knight".into()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn suit_is_case_sensitive() {
        let err = Deck::load(vec![RawRow::new("hearts", "1", "Lion")]).unwrap_err();
        assert!(matches!(
            err,
            QuizError::Validation {
                row: 1,
                kind: ValidationError::UnknownSuit(_)
            }
        ));
    }

    #[test]
    fn blank_object_is_rejected() {
        let err = Deck::load(vec![RawRow::new("Clubs", "3", "  ")]).unwrap_err();
        assert!(matches!(
            err,
            QuizError::Validation {
                kind: ValidationError::EmptyObject,
                ..
            }
        ));
    }

    #[test]
    fn read_rows_uses_header_names() {
        let rows = read_rows("rank,object,suite\n1,Lion,Hearts\nKing,Tiger,Spades\n").unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::new("Hearts", "1", "Lion"),
                RawRow::new("Spades", "King", "Tiger"),
            ]
        );
    }

    #[test]
    fn read_rows_handles_quoted_objects() {
        let rows = read_rows("suite,rank,object\nDiamonds,Queen,\"Owl, snowy\"\n").unwrap();
        assert_eq!(rows[0].object, "Owl, snowy");
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let err = read_rows("suite,rank\nHearts,1\n").unwrap_err();
        assert!(matches!(err, QuizError::Parse(_)));
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let err = read_rows("Suite,Rank,Object\nHearts,1,Lion\n").unwrap_err();
        assert!(matches!(err, QuizError::Parse(_)));
    }

    #[test]
    fn sample_deck_is_complete() {
        let rows = read_rows(include_str!("../../cards.csv")).unwrap();
        let deck = Deck::load(rows).unwrap();
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn deck_exports_as_a_list() {
        let deck = Deck::new(vec![
            DeckEntry::new(Suit::Hearts, Rank::Ace, "Lion"),
            DeckEntry::new(Suit::Clubs, Rank::Seven, "Cat"),
        ]);
        let json = serde_json::to_value(&deck).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "rank": "Ace", "suit": "Hearts", "object": "Lion" },
                { "rank": "7", "suit": "Clubs", "object": "Cat" },
            ])
        );
    }

    #[test]
    fn header_only_file_is_an_empty_deck() {
        let rows = read_rows("suite,rank,object\n").unwrap();
        assert!(Deck::load(rows).unwrap().is_empty());
    }
}
