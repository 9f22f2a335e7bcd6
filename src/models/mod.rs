pub mod alert;
pub mod game_record;
pub mod question;
pub mod quiz_step;

pub use alert::{AlertCompletion, AlertModel};
pub use game_record::{AggregateStatistics, GameRecord};
pub use question::QuizQuestion;
pub use quiz_step::{Poster, PosterMeta, QuizStep};
