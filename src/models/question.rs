/// One yes/no question about a movie poster.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    /// Raw poster bytes as delivered by the question source.
    pub image: Vec<u8>,
    pub text: String,
    pub correct_answer: bool,
}

impl QuizQuestion {
    pub fn new(image: Vec<u8>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            text: text.into(),
            correct_answer,
        }
    }

    /// Whether a yes/no tap matches the expected answer.
    pub fn is_correct(&self, is_yes: bool) -> bool {
        is_yes == self.correct_answer
    }
}
