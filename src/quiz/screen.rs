use std::sync::Arc;

use log::debug;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    display::QuizDisplay, settings::QuizSettings, source::QuestionSource,
    statistics::StatisticService,
};

use super::{QuizEvent, QuizPresenter};

/// Owns a running quiz: the display and the presenter task behind it.
///
/// The presenter only holds a weak reference to the display, so dropping the
/// screen tears both down.
pub struct QuizScreen {
    /// Keeps the presenter's weak reference alive.
    _display: Arc<dyn QuizDisplay>,
    events: mpsc::UnboundedSender<QuizEvent>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl QuizScreen {
    /// Spawn the presenter and start loading. Must be called inside a tokio
    /// runtime.
    pub fn open(
        display: Arc<dyn QuizDisplay>,
        source: Arc<dyn QuestionSource>,
        statistics: Arc<dyn StatisticService>,
        settings: &QuizSettings,
    ) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let presenter = QuizPresenter::new(
            settings,
            Arc::downgrade(&display),
            source,
            statistics,
            events.clone(),
        );

        let shutdown = CancellationToken::new();
        let task = tokio::spawn(presenter.run(rx, shutdown.clone()));

        Self {
            _display: display,
            events,
            shutdown,
            task: Some(task),
        }
    }

    pub fn yes_tapped(&self) {
        self.send(QuizEvent::Tap { is_yes: true });
    }

    pub fn no_tapped(&self) {
        self.send(QuizEvent::Tap { is_yes: false });
    }

    pub fn restart(&self) {
        self.send(QuizEvent::Restart);
    }

    /// Stop the presenter and wait for it to finish.
    pub async fn close(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                debug!("quiz presenter task ended abnormally: {err}");
            }
        }
    }

    fn send(&self, event: QuizEvent) {
        if self.events.send(event).is_err() {
            debug!("quiz presenter is gone; dropping input");
        }
    }
}

impl Drop for QuizScreen {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
