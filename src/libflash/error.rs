use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("malformed deck file: {0}")]
    Parse(#[from] csv::Error),
    #[error("row {row}: {kind}")]
    Validation { row: usize, kind: ValidationError },
    #[error("the deck has no cards")]
    EmptyDeck,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown rank {0:?}")]
    UnknownRank(String),
    #[error("unknown suite {0:?}")]
    UnknownSuit(String),
    #[error("object is empty")]
    EmptyObject,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
}
