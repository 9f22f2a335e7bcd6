use serde::{Deserialize, Serialize};

/// Where the presenter is in a single quiz round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QuizPhase {
    Loading,
    AwaitingAnswer,
    ShowingAnswerFeedback,
    Finished,
    Failed,
}

impl Default for QuizPhase {
    fn default() -> Self {
        QuizPhase::Loading
    }
}

/// Progress through one round of questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_question_index: u32,
    pub correct_answers: u32,
    total_questions: u32,
}

impl SessionState {
    pub fn new(total_questions: u32) -> Self {
        debug_assert!(total_questions > 0, "a quiz needs at least one question");
        Self {
            current_question_index: 0,
            correct_answers: 0,
            total_questions,
        }
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn reset(&mut self, total_questions: u32) {
        *self = Self::new(total_questions);
    }

    /// Move to the next question. Callers check `is_finished` first.
    pub fn advance(&mut self) {
        debug_assert!(
            !self.is_finished(),
            "advance() called on the last question"
        );
        self.current_question_index += 1;
    }

    pub fn record_answer(&mut self, is_correct: bool) {
        self.correct_answers += u32::from(is_correct);
    }

    /// True while the last question is on screen, not after moving past it.
    /// The round is finalized from the last answer's feedback, so the index
    /// never reaches `total_questions`.
    pub fn is_finished(&self) -> bool {
        self.current_question_index + 1 == self.total_questions
    }

    pub fn question_number_prompt(&self) -> String {
        format!("{}/{}", self.current_question_index + 1, self.total_questions)
    }

    pub fn result_prompt(&self) -> String {
        format!(
            "Ваш результат: {} из {}",
            self.correct_answers, self.total_questions
        )
    }
}
