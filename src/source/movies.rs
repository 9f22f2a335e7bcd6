use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{QuestionSource, SourceError};
use crate::models::QuizQuestion;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

const MIN_THRESHOLD: u8 = 5;
const MAX_THRESHOLD: u8 = 8;

/// One entry of the movie list file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub rating: f32,
    /// Poster path, relative to the list file.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Builds "is the rating above N?" questions from a JSON movie list.
pub struct MovieQuestionSource {
    list_path: PathBuf,
    movies: RwLock<Vec<Movie>>,
}

impl MovieQuestionSource {
    pub fn new(list_path: impl Into<PathBuf>) -> Self {
        Self {
            list_path: list_path.into(),
            movies: RwLock::new(Vec::new()),
        }
    }

    fn poster_path(&self, image: &Path) -> PathBuf {
        match self.list_path.parent() {
            Some(dir) if image.is_relative() => dir.join(image),
            _ => image.to_path_buf(),
        }
    }

    async fn load_poster(&self, movie: &Movie) -> Result<Vec<u8>, SourceError> {
        let Some(image) = &movie.image else {
            return Ok(Vec::new());
        };
        tokio::fs::read(self.poster_path(image))
            .await
            .map_err(|source| SourceError::Poster {
                title: movie.title.clone(),
                source,
            })
    }
}

/// Prompt text and expected answer for `movie` against `threshold`.
pub fn rating_question(movie: &Movie, threshold: u8) -> (String, bool) {
    (
        format!("Рейтинг этого фильма больше чем {threshold}?"),
        movie.rating > f32::from(threshold),
    )
}

#[async_trait]
impl QuestionSource for MovieQuestionSource {
    async fn load_data(&self) -> Result<(), SourceError> {
        let path = self.list_path.clone();
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        let movies: Vec<Movie> =
            serde_json::from_str(&contents).map_err(|source| SourceError::Parse {
                path: path.clone(),
                source,
            })?;

        if movies.is_empty() {
            log_warn!("movie list {} is empty", path.display());
            return Err(SourceError::Empty);
        }

        log_info!("loaded {} movies from {}", movies.len(), path.display());
        *self.movies.write().await = movies;
        Ok(())
    }

    async fn next_question(&self) -> Result<Option<QuizQuestion>, SourceError> {
        let picked = {
            let movies = self.movies.read().await;
            let mut rng = rand::thread_rng();
            movies
                .choose(&mut rng)
                .cloned()
                .map(|movie| (movie, rng.gen_range(MIN_THRESHOLD..=MAX_THRESHOLD)))
        };

        let Some((movie, threshold)) = picked else {
            return Ok(None);
        };

        let image = self.load_poster(&movie).await?;
        let (text, correct_answer) = rating_question(&movie, threshold);
        Ok(Some(QuizQuestion::new(image, text, correct_answer)))
    }
}
