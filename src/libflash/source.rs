use crate::libflash::deck::{read_rows, RawRow};
use crate::libflash::error::{FetchError, QuizError};
use log::debug;
use std::fmt;
use std::path::PathBuf;

/// Where deck text comes from: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSource {
    File(PathBuf),
    Url(String),
}

impl DeckSource {
    pub fn parse(value: &str) -> DeckSource {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DeckSource::Url(trimmed.to_string())
        } else {
            DeckSource::File(PathBuf::from(trimmed))
        }
    }

    /// Blocks until the whole text is available.
    pub fn fetch(&self) -> Result<String, FetchError> {
        debug!("[Source] Fetching {}", self);
        match self {
            DeckSource::File(path) => std::fs::read_to_string(path).map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            }),
            DeckSource::Url(url) => {
                let response = reqwest::blocking::get(url)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status));
                }
                Ok(response.text()?)
            }
        }
    }

    pub fn read(&self) -> Result<Vec<RawRow>, QuizError> {
        let text = self.fetch()?;
        read_rows(&text)
    }
}

impl fmt::Display for DeckSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckSource::File(path) => write!(f, "{}", path.display()),
            DeckSource::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("flashcards-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parse_recognises_urls() {
        assert_eq!(
            DeckSource::parse("https://example.com/cards.csv"),
            DeckSource::Url("https://example.com/cards.csv".into())
        );
        assert_eq!(
            DeckSource::parse(" http://localhost/cards.csv\n"),
            DeckSource::Url("http://localhost/cards.csv".into())
        );
        assert_eq!(
            DeckSource::parse("decks/cards.csv"),
            DeckSource::File(PathBuf::from("decks/cards.csv"))
        );
    }

    #[test]
    fn reads_rows_from_a_file() {
        let path = scratch_file("ok.csv", "suite,rank,object\nHearts,1,Lion\nSpades,King,Tiger\n");
        let rows = DeckSource::File(path.clone()).read().unwrap();
        fs::remove_file(path).unwrap();

        assert_eq!(
            rows,
            vec![
                RawRow::new("Hearts", "1", "Lion"),
                RawRow::new("Spades", "King", "Tiger"),
            ]
        );
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let source = DeckSource::File(PathBuf::from("/nonexistent/flashcards/cards.csv"));
        let err = source.read().unwrap_err();
        assert!(matches!(err, QuizError::Fetch(FetchError::Io { .. })));
        assert!(err.to_string().contains("cards.csv"));
    }

    #[test]
    fn display_shows_the_location() {
        assert_eq!(DeckSource::parse("cards.csv").to_string(), "cards.csv");
        assert_eq!(
            DeckSource::parse("https://example.com/a.csv").to_string(),
            "https://example.com/a.csv"
        );
    }
}
