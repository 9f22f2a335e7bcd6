pub mod debouncer;
pub mod presenter;
pub mod screen;
pub mod state;

pub use debouncer::Debouncer;
pub use presenter::{QuizEvent, QuizPresenter, SessionId};
pub use screen::QuizScreen;
pub use state::{QuizPhase, SessionState};
