use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{QuestionSource, SourceError};
use crate::models::QuizQuestion;

/// A fixed list of questions handed out in order, wrapping around.
pub struct StaticQuestionSource {
    questions: Vec<QuizQuestion>,
    cursor: AtomicUsize,
    load_failure: Option<String>,
}

impl StaticQuestionSource {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            cursor: AtomicUsize::new(0),
            load_failure: None,
        }
    }

    /// A source whose `load_data` always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            load_failure: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// The built-in ten film deck, without posters.
    pub fn builtin() -> Self {
        const PROMPT: &str = "Рейтинг этого фильма больше чем 6?";
        let deck = [
            ("The Godfather", true),
            ("The Dark Knight", true),
            ("Kill Bill", true),
            ("The Avengers", true),
            ("Deadpool", true),
            ("The Green Knight", true),
            ("Old", false),
            ("The Ice Age Adventures of Buck Wild", false),
            ("Tesla", false),
            ("Vivarium", false),
        ];

        Self::new(
            deck.iter()
                .map(|(title, answer)| {
                    QuizQuestion::new(Vec::new(), format!("{title}. {PROMPT}"), *answer)
                })
                .collect(),
        )
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn load_data(&self) -> Result<(), SourceError> {
        if let Some(message) = &self.load_failure {
            return Err(SourceError::Unavailable(message.clone()));
        }
        if self.questions.is_empty() {
            return Err(SourceError::Empty);
        }
        self.cursor.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn next_question(&self) -> Result<Option<QuizQuestion>, SourceError> {
        if self.questions.is_empty() {
            return Ok(None);
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst) % self.questions.len();
        Ok(self.questions.get(index).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hands_out_questions_in_order_and_wraps() {
        let source = StaticQuestionSource::new(vec![
            QuizQuestion::new(Vec::new(), "a", true),
            QuizQuestion::new(Vec::new(), "b", false),
        ]);
        source.load_data().await.unwrap();

        let texts: Vec<String> = [
            source.next_question().await.unwrap(),
            source.next_question().await.unwrap(),
            source.next_question().await.unwrap(),
        ]
        .into_iter()
        .map(|q| q.unwrap().text)
        .collect();
        assert_eq!(texts, ["a", "b", "a"]);
    }

    #[tokio::test]
    async fn failing_source_reports_message() {
        let source = StaticQuestionSource::failing("Сервер недоступен");
        let err = source.load_data().await.unwrap_err();
        assert_eq!(err.to_string(), "Сервер недоступен");
    }

    #[tokio::test]
    async fn builtin_deck_has_ten_questions() {
        let source = StaticQuestionSource::builtin();
        assert_eq!(source.questions.len(), 10);
        source.load_data().await.unwrap();
        let first = source.next_question().await.unwrap().unwrap();
        assert!(first.text.starts_with("The Godfather"));
        assert!(first.correct_answer);
    }
}
