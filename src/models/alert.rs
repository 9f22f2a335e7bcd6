use std::fmt;

/// Action run when the user dismisses an alert.
pub type AlertCompletion = Box<dyn FnOnce() + Send + 'static>;

/// A modal dialog with a single button.
pub struct AlertModel {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub completion: AlertCompletion,
}

impl AlertModel {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        button_text: impl Into<String>,
        completion: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button_text: button_text.into(),
            completion: Box::new(completion),
        }
    }

    /// Consume the alert and run its button action.
    pub fn dismiss(self) {
        (self.completion)();
    }
}

impl fmt::Debug for AlertModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertModel")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("button_text", &self.button_text)
            .finish_non_exhaustive()
    }
}
