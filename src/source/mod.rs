//! Where quiz questions come from.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::QuizQuestion;

mod movies;
mod static_deck;

pub use movies::{Movie, MovieQuestionSource};
pub use static_deck::StaticQuestionSource;

/// Failures a question source reports to the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("movie list {} is malformed: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no movies to ask about")]
    Empty,
    #[error("failed to load poster for \"{title}\": {source}")]
    Poster {
        title: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Unavailable(String),
}

/// Asynchronous supplier of questions.
///
/// `load_data` runs once per session start (and again on retry) before any
/// `next_question` call.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn load_data(&self) -> Result<(), SourceError>;

    /// `Ok(None)` means the source has nothing to offer right now.
    async fn next_question(&self) -> Result<Option<QuizQuestion>, SourceError>;
}
