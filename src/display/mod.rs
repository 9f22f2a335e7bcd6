//! The narrow surface the presenter draws through.

use crate::models::{AlertModel, QuizStep};

mod console;

pub use console::{Command as ConsoleCommand, ConsoleDisplay, ConsoleInput};

/// Rendering callbacks. All calls arrive on the presenter's task.
pub trait QuizDisplay: Send + Sync {
    fn show_step(&self, step: QuizStep);
    /// Result and error dialogs. The display runs `alert.completion` when
    /// the user presses the button.
    fn show_alert(&self, alert: AlertModel);
    fn highlight_answer(&self, is_correct: bool);
    fn show_loading(&self);
    fn hide_loading(&self);
}
