use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use log::{debug, info, warn};
use tokio::{sync::mpsc, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    display::QuizDisplay,
    models::{AggregateStatistics, AlertModel, Poster, QuizQuestion, QuizStep},
    settings::QuizSettings,
    source::QuestionSource,
    statistics::StatisticService,
};

use super::{Debouncer, QuizPhase, SessionState};

pub const RESULT_TITLE: &str = "Этот раунд окончен!";
pub const RESULT_BUTTON: &str = "Сыграть ещё раз";
pub const ERROR_TITLE: &str = "Ошибка";
pub const ERROR_BUTTON: &str = "Попробовать ещё раз";

/// Identifies one round; results tagged with an older id are dropped.
pub type SessionId = Uuid;

/// Everything the presenter reacts to. Delivered on its own task.
#[derive(Debug)]
pub enum QuizEvent {
    /// Raw button press, not yet debounced.
    Tap { is_yes: bool },
    /// A press that survived the debounce window, tagged with the question
    /// that was on screen when it was made.
    Answer {
        session: SessionId,
        question: u64,
        is_yes: bool,
    },
    DataLoaded {
        session: SessionId,
    },
    DataLoadFailed {
        session: SessionId,
        message: String,
    },
    QuestionReceived {
        session: SessionId,
        question: Option<QuizQuestion>,
    },
    FeedbackElapsed {
        session: SessionId,
    },
    Restart,
    Retry,
}

/// The quiz state machine.
///
/// Owns the round's [`SessionState`] and drives the question source, the
/// statistics store and the display. Every mutation happens inside
/// [`QuizPresenter::handle`], which is only called from the presenter task.
pub struct QuizPresenter {
    display: Weak<dyn QuizDisplay>,
    source: Arc<dyn QuestionSource>,
    statistics: Arc<dyn StatisticService>,
    events: mpsc::UnboundedSender<QuizEvent>,
    questions_amount: u32,
    feedback_delay: Duration,
    session: SessionState,
    session_id: SessionId,
    phase: QuizPhase,
    current_question: Option<QuizQuestion>,
    /// Bumped for every question shown.
    question_seq: u64,
    session_token: CancellationToken,
    debouncer: Debouncer,
    feedback: Option<JoinHandle<()>>,
}

impl QuizPresenter {
    pub fn new(
        settings: &QuizSettings,
        display: Weak<dyn QuizDisplay>,
        source: Arc<dyn QuestionSource>,
        statistics: Arc<dyn StatisticService>,
        events: mpsc::UnboundedSender<QuizEvent>,
    ) -> Self {
        Self {
            display,
            source,
            statistics,
            events,
            questions_amount: settings.questions_amount,
            feedback_delay: settings.feedback_delay(),
            session: SessionState::new(settings.questions_amount),
            session_id: Uuid::new_v4(),
            phase: QuizPhase::Loading,
            current_question: None,
            question_seq: 0,
            session_token: CancellationToken::new(),
            debouncer: Debouncer::new(settings.debounce()),
            feedback: None,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Drain events until `shutdown` fires.
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<QuizEvent>,
        shutdown: CancellationToken,
    ) {
        self.start();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
            }
        }

        self.teardown();
        debug!("quiz presenter stopped");
    }

    /// Show the spinner and ask the source to load its data.
    pub fn start(&mut self) {
        self.phase = QuizPhase::Loading;
        self.with_display(|display| display.show_loading());
        self.spawn_load();
    }

    pub fn handle(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::Tap { is_yes } => self.on_tap(is_yes),
            QuizEvent::Answer {
                session,
                question,
                is_yes,
            } => self.on_user_answer(session, question, is_yes),
            QuizEvent::DataLoaded { session } => self.on_data_loaded(session),
            QuizEvent::DataLoadFailed { session, message } => {
                self.on_data_load_failed(session, message)
            }
            QuizEvent::QuestionReceived { session, question } => {
                self.on_question_received(session, question)
            }
            QuizEvent::FeedbackElapsed { session } => self.on_feedback_elapsed(session),
            QuizEvent::Restart => self.restart(),
            QuizEvent::Retry => self.retry(),
        }
    }

    fn on_tap(&mut self, is_yes: bool) {
        if self.phase != QuizPhase::AwaitingAnswer || self.current_question.is_none() {
            debug!("ignoring tap while {:?}", self.phase);
            return;
        }

        if self.debouncer.is_pending() {
            debug!("tap replaces the pending one");
        }
        let events = self.events.clone();
        let session = self.session_id;
        let question = self.question_seq;
        self.debouncer.schedule(move || {
            let _ = events.send(QuizEvent::Answer {
                session,
                question,
                is_yes,
            });
        });
    }

    fn on_data_loaded(&mut self, session: SessionId) {
        if self.is_stale(session) {
            return;
        }
        info!("question data loaded");
        self.with_display(|display| display.hide_loading());
        self.request_next_question();
    }

    fn on_data_load_failed(&mut self, session: SessionId, message: String) {
        if self.is_stale(session) {
            return;
        }
        warn!("question source failed: {message}");
        self.phase = QuizPhase::Failed;
        self.current_question = None;

        let events = self.events.clone();
        let alert = AlertModel::new(ERROR_TITLE, message, ERROR_BUTTON, move || {
            let _ = events.send(QuizEvent::Retry);
        });
        self.with_display(|display| {
            display.hide_loading();
            display.show_alert(alert);
        });
    }

    fn on_question_received(&mut self, session: SessionId, question: Option<QuizQuestion>) {
        if self.is_stale(session) {
            return;
        }
        let Some(question) = question else {
            warn!("question source returned no question");
            return;
        };

        let step = self.convert(&question);
        self.current_question = Some(question);
        self.question_seq += 1;
        self.phase = QuizPhase::AwaitingAnswer;
        self.with_display(|display| display.show_step(step));
    }

    /// A debounced answer. Only the first answer to the question it was made
    /// on is accepted.
    fn on_user_answer(&mut self, session: SessionId, question: u64, is_yes: bool) {
        if self.is_stale(session) {
            return;
        }
        if question != self.question_seq {
            debug!("dropping answer made on an earlier question");
            return;
        }
        if self.phase != QuizPhase::AwaitingAnswer {
            debug!("ignoring answer while {:?}", self.phase);
            return;
        }
        let Some(question) = self.current_question.take() else {
            debug!("ignoring answer with no question on screen");
            return;
        };

        let is_correct = question.is_correct(is_yes);
        self.session.record_answer(is_correct);
        self.phase = QuizPhase::ShowingAnswerFeedback;
        self.with_display(|display| display.highlight_answer(is_correct));
        self.spawn_feedback_timer();
    }

    fn on_feedback_elapsed(&mut self, session: SessionId) {
        if self.is_stale(session) || self.phase != QuizPhase::ShowingAnswerFeedback {
            return;
        }
        self.feedback = None;
        self.finalize_or_advance();
    }

    fn finalize_or_advance(&mut self) {
        if !self.session.is_finished() {
            self.session.advance();
            self.phase = QuizPhase::AwaitingAnswer;
            self.request_next_question();
            return;
        }

        self.phase = QuizPhase::Finished;
        let stats = self
            .statistics
            .store(self.session.correct_answers, self.session.total_questions());
        info!(
            "round finished: {}/{} (games played: {})",
            self.session.correct_answers,
            self.session.total_questions(),
            stats.games_count
        );

        let events = self.events.clone();
        let alert = AlertModel::new(
            RESULT_TITLE,
            result_message(&self.session, &stats),
            RESULT_BUTTON,
            move || {
                let _ = events.send(QuizEvent::Restart);
            },
        );
        self.with_display(|display| display.show_alert(alert));
    }

    /// Start a fresh round on the already loaded data. Until the source has
    /// loaded successfully this reloads it instead.
    pub fn restart(&mut self) {
        if matches!(self.phase, QuizPhase::Loading | QuizPhase::Failed) {
            self.retry();
            return;
        }
        self.begin_session();
        self.phase = QuizPhase::AwaitingAnswer;
        self.request_next_question();
    }

    /// Reload the source data and start a fresh round.
    pub fn retry(&mut self) {
        self.begin_session();
        self.start();
    }

    fn begin_session(&mut self) {
        self.session_token.cancel();
        self.session_token = CancellationToken::new();
        self.session_id = Uuid::new_v4();
        self.debouncer.cancel();
        if let Some(handle) = self.feedback.take() {
            handle.abort();
        }
        self.current_question = None;
        self.session.reset(self.questions_amount);
    }

    fn teardown(&mut self) {
        self.session_token.cancel();
        self.debouncer.cancel();
        if let Some(handle) = self.feedback.take() {
            handle.abort();
        }
    }

    fn convert(&self, question: &QuizQuestion) -> QuizStep {
        QuizStep {
            poster: Poster::from_bytes(question.image.clone()),
            question: question.text.clone(),
            question_number: self.session.question_number_prompt(),
        }
    }

    fn is_stale(&self, session: SessionId) -> bool {
        let stale = session != self.session_id;
        if stale {
            debug!("dropping result from stale session {session}");
        }
        stale
    }

    fn with_display(&self, f: impl FnOnce(&dyn QuizDisplay)) {
        match self.display.upgrade() {
            Some(display) => f(display.as_ref()),
            None => debug!("display torn down; skipping update"),
        }
    }

    fn spawn_load(&self) {
        let source = self.source.clone();
        let events = self.events.clone();
        let token = self.session_token.clone();
        let session = self.session_id;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = source.load_data() => {
                    let event = match result {
                        Ok(()) => QuizEvent::DataLoaded { session },
                        Err(err) => QuizEvent::DataLoadFailed {
                            session,
                            message: err.to_string(),
                        },
                    };
                    let _ = events.send(event);
                }
            }
        });
    }

    fn request_next_question(&self) {
        let source = self.source.clone();
        let events = self.events.clone();
        let token = self.session_token.clone();
        let session = self.session_id;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = source.next_question() => {
                    let event = match result {
                        Ok(question) => QuizEvent::QuestionReceived { session, question },
                        Err(err) => QuizEvent::DataLoadFailed {
                            session,
                            message: err.to_string(),
                        },
                    };
                    let _ = events.send(event);
                }
            }
        });
    }

    fn spawn_feedback_timer(&mut self) {
        let events = self.events.clone();
        let delay = self.feedback_delay;
        let session = self.session_id;

        self.feedback = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(QuizEvent::FeedbackElapsed { session });
        }));
    }
}

/// Multi-line summary shown when a round ends.
pub fn result_message(session: &SessionState, stats: &AggregateStatistics) -> String {
    let best = &stats.best_game;
    [
        session.result_prompt(),
        format!("Количество сыгранных квизов: {}", stats.games_count),
        format!(
            "Рекорд: {}/{} ({})",
            best.correct,
            best.total,
            best.date_prompt()
        ),
        format!("Средняя точность: {:.2}%", stats.total_accuracy),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameRecord;
    use crate::source::{SourceError, StaticQuestionSource};
    use crate::statistics::StatisticsStore;
    use crate::storage::MemoryBackend;
    use chrono::{TimeZone, Utc};
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Step(String, String),
        Alert(String, String),
        Highlight(bool),
        Loading,
        Loaded,
    }

    #[derive(Default)]
    struct RecordingDisplay {
        calls: Mutex<Vec<Call>>,
        alerts: Mutex<Vec<AlertModel>>,
    }

    impl RecordingDisplay {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn dismiss_alert(&self) {
            let alert = self.alerts.lock().unwrap().pop().expect("no alert shown");
            alert.dismiss();
        }
    }

    impl QuizDisplay for RecordingDisplay {
        fn show_step(&self, step: QuizStep) {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Step(step.question, step.question_number));
        }

        fn show_alert(&self, alert: AlertModel) {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Alert(alert.title.clone(), alert.message.clone()));
            self.alerts.lock().unwrap().push(alert);
        }

        fn highlight_answer(&self, is_correct: bool) {
            self.calls.lock().unwrap().push(Call::Highlight(is_correct));
        }

        fn show_loading(&self) {
            self.calls.lock().unwrap().push(Call::Loading);
        }

        fn hide_loading(&self) {
            self.calls.lock().unwrap().push(Call::Loaded);
        }
    }

    struct Harness {
        presenter: QuizPresenter,
        events: mpsc::UnboundedReceiver<QuizEvent>,
        display: Arc<RecordingDisplay>,
        statistics: Arc<StatisticsStore>,
    }

    impl Harness {
        fn new(source: impl QuestionSource + 'static, questions_amount: u32) -> Self {
            let settings = QuizSettings {
                questions_amount,
                ..QuizSettings::default()
            };
            let display = Arc::new(RecordingDisplay::default());
            let statistics = Arc::new(StatisticsStore::new(Arc::new(MemoryBackend::new())));
            let (tx, rx) = mpsc::unbounded_channel();
            let weak: Weak<RecordingDisplay> = Arc::downgrade(&display);
            let presenter = QuizPresenter::new(
                &settings,
                weak,
                Arc::new(source),
                statistics.clone(),
                tx,
            );
            Self {
                presenter,
                events: rx,
                display,
                statistics,
            }
        }

        async fn pump(&mut self) {
            let event = self.events.recv().await.expect("event channel closed");
            self.presenter.handle(event);
        }

        /// Pump until the presenter is waiting for an answer with a question shown.
        async fn pump_until_question(&mut self) {
            while !(self.presenter.phase() == QuizPhase::AwaitingAnswer
                && self.presenter.current_question.is_some())
            {
                self.pump().await;
            }
        }

        fn answer_event(&self, is_yes: bool) -> QuizEvent {
            QuizEvent::Answer {
                session: self.presenter.session_id(),
                question: self.presenter.question_seq,
                is_yes,
            }
        }

        fn highlights(&self) -> usize {
            self.display
                .calls()
                .iter()
                .filter(|c| matches!(c, Call::Highlight(_)))
                .count()
        }

        async fn answer(&mut self, is_yes: bool) {
            self.presenter.handle(QuizEvent::Tap { is_yes });
            // Debounced answer, then the feedback delay.
            self.pump().await;
            self.pump().await;
        }
    }

    /// Hands out nothing until `load_data` has succeeded, like a list-backed source.
    struct LoadGatedSource {
        loaded: AtomicBool,
        deck: StaticQuestionSource,
    }

    #[async_trait::async_trait]
    impl QuestionSource for LoadGatedSource {
        async fn load_data(&self) -> Result<(), SourceError> {
            self.deck.load_data().await?;
            self.loaded.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn next_question(&self) -> Result<Option<QuizQuestion>, SourceError> {
            if !self.loaded.load(Ordering::SeqCst) {
                return Ok(None);
            }
            self.deck.next_question().await
        }
    }

    fn deck(answers: &[bool]) -> StaticQuestionSource {
        StaticQuestionSource::new(
            answers
                .iter()
                .enumerate()
                .map(|(i, answer)| QuizQuestion::new(Vec::new(), format!("Q{i}"), *answer))
                .collect(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn first_question_is_converted_for_display() {
        let mut h = Harness::new(deck(&[true]), 10);
        h.presenter.start();
        h.pump_until_question().await;

        assert_eq!(
            h.display.calls(),
            vec![
                Call::Loading,
                Call::Loaded,
                Call::Step("Q0".into(), "1/10".into())
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn answer_highlights_and_advances() {
        let mut h = Harness::new(deck(&[true, false]), 3);
        h.presenter.start();
        h.pump_until_question().await;

        h.answer(true).await;
        assert_eq!(h.presenter.session().correct_answers, 1);
        assert_eq!(h.presenter.session().current_question_index, 1);

        h.pump_until_question().await;
        let calls = h.display.calls();
        assert!(calls.contains(&Call::Highlight(true)));
        assert_eq!(calls.last(), Some(&Call::Step("Q1".into(), "2/3".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn double_tap_answers_once() {
        let mut h = Harness::new(deck(&[false]), 3);
        h.presenter.start();
        h.pump_until_question().await;

        h.presenter.handle(QuizEvent::Tap { is_yes: true });
        h.presenter.handle(QuizEvent::Tap { is_yes: false });
        h.pump().await;

        assert_eq!(h.presenter.phase(), QuizPhase::ShowingAnswerFeedback);
        assert_eq!(h.presenter.session().correct_answers, 1);
        let highlights: Vec<_> = h
            .display
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Highlight(_)))
            .collect();
        assert_eq!(highlights, vec![Call::Highlight(true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn answers_during_feedback_are_ignored() {
        let mut h = Harness::new(deck(&[true]), 3);
        h.presenter.start();
        h.pump_until_question().await;

        let answer = h.answer_event(true);
        let repeat = h.answer_event(true);
        h.presenter.handle(answer);
        h.presenter.handle(repeat);

        assert_eq!(h.presenter.session().correct_answers, 1);
        assert_eq!(h.highlights(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tap_late_in_feedback_does_not_answer_next_question() {
        let mut h = Harness::new(deck(&[true, true]), 3);
        h.presenter.start();
        h.pump_until_question().await;

        h.presenter.handle(QuizEvent::Tap { is_yes: true });
        h.pump().await;
        assert_eq!(h.presenter.phase(), QuizPhase::ShowingAnswerFeedback);

        // Its debounce window would close after the next question is shown.
        time::sleep(Duration::from_millis(900)).await;
        h.presenter.handle(QuizEvent::Tap { is_yes: false });

        h.pump_until_question().await;
        time::sleep(Duration::from_secs(2)).await;
        assert!(h.events.try_recv().is_err());
        assert_eq!(h.presenter.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(h.highlights(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn answer_for_an_earlier_question_is_dropped() {
        let mut h = Harness::new(deck(&[true, true]), 3);
        h.presenter.start();
        h.pump_until_question().await;
        let early = h.answer_event(true);

        h.answer(true).await;
        h.pump_until_question().await;
        h.presenter.handle(early);

        assert_eq!(h.presenter.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(h.presenter.session().correct_answers, 1);
        assert_eq!(h.highlights(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn answer_without_question_is_a_no_op() {
        let mut h = Harness::new(deck(&[true]), 3);
        let answer = h.answer_event(true);
        h.presenter.handle(answer);
        h.presenter.handle(QuizEvent::Tap { is_yes: true });
        assert!(h.events.try_recv().is_err());

        assert_eq!(h.presenter.session().correct_answers, 0);
        assert!(h.display.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn last_answer_records_statistics_and_shows_results() {
        let mut h = Harness::new(deck(&[true, true]), 2);
        h.presenter.start();
        h.pump_until_question().await;
        h.answer(true).await;
        h.pump_until_question().await;
        h.answer(false).await;

        assert_eq!(h.presenter.phase(), QuizPhase::Finished);
        assert_eq!(h.statistics.games_count(), 1);
        assert_eq!(h.statistics.best_game().correct, 1);

        let Some(Call::Alert(title, message)) = h.display.calls().last().cloned() else {
            panic!("expected result alert");
        };
        assert_eq!(title, RESULT_TITLE);
        assert!(message.starts_with("Ваш результат: 1 из 2"));
        assert!(message.contains("Количество сыгранных квизов: 1"));
        assert!(message.contains("Средняя точность: 50.00%"));
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_results_restarts_round() {
        let mut h = Harness::new(deck(&[true]), 1);
        h.presenter.start();
        h.pump_until_question().await;
        h.answer(true).await;
        assert_eq!(h.presenter.phase(), QuizPhase::Finished);
        let finished_session = h.presenter.session_id();

        h.display.dismiss_alert();
        h.pump().await;
        assert_ne!(h.presenter.session_id(), finished_session);
        assert_eq!(h.presenter.session().correct_answers, 0);

        h.pump_until_question().await;
        assert_eq!(
            h.display.calls().last(),
            Some(&Call::Step("Q0".into(), "1/1".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn load_failure_shows_retry_alert() {
        let mut h = Harness::new(StaticQuestionSource::failing("Не удалось загрузить фильмы"), 10);
        h.presenter.start();
        h.pump().await;

        assert_eq!(h.presenter.phase(), QuizPhase::Failed);
        assert_eq!(
            h.display.calls().last(),
            Some(&Call::Alert(
                ERROR_TITLE.into(),
                "Не удалось загрузить фильмы".into()
            ))
        );

        h.display.dismiss_alert();
        h.pump().await;
        assert_eq!(h.presenter.phase(), QuizPhase::Loading);
        assert_eq!(h.display.calls().last(), Some(&Call::Loading));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_question_after_restart_is_dropped() {
        let mut h = Harness::new(deck(&[true]), 10);
        h.presenter.start();
        h.pump_until_question().await;
        let old_session = h.presenter.session_id();
        h.presenter.restart();
        let shown = h.display.calls().len();

        h.presenter.handle(QuizEvent::QuestionReceived {
            session: old_session,
            question: Some(QuizQuestion::new(Vec::new(), "stale", true)),
        });
        assert!(h.presenter.current_question.is_none());
        assert_eq!(h.display.calls().len(), shown);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_before_data_loaded_reloads_source() {
        let source = LoadGatedSource {
            loaded: AtomicBool::new(false),
            deck: deck(&[true]),
        };
        let mut h = Harness::new(source, 10);
        h.presenter.start();
        h.presenter.restart();

        h.pump_until_question().await;
        assert_eq!(
            h.display.calls(),
            vec![
                Call::Loading,
                Call::Loading,
                Call::Loaded,
                Call::Step("Q0".into(), "1/10".into())
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_failure_reloads_source() {
        let mut h = Harness::new(StaticQuestionSource::failing("нет сети"), 10);
        h.presenter.start();
        h.pump().await;
        assert_eq!(h.presenter.phase(), QuizPhase::Failed);

        h.presenter.restart();
        assert_eq!(h.presenter.phase(), QuizPhase::Loading);
        assert_eq!(h.display.calls().last(), Some(&Call::Loading));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_display_is_tolerated() {
        let mut h = Harness::new(deck(&[true]), 10);
        let display = std::mem::take(&mut h.display);
        drop(display);

        h.presenter.start();
        h.pump_until_question().await;
        assert_eq!(h.presenter.phase(), QuizPhase::AwaitingAnswer);
    }

    #[test]
    fn result_message_layout() {
        let mut session = SessionState::new(10);
        for _ in 0..7 {
            session.record_answer(true);
        }
        let date = Utc.with_ymd_and_hms(2023, 1, 30, 12, 0, 0).unwrap();
        let stats = AggregateStatistics {
            games_count: 3,
            total_accuracy: 76.666_666,
            best_game: GameRecord::new(9, 10, date),
        };

        let message = result_message(&session, &stats);
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Ваш результат: 7 из 10");
        assert_eq!(lines[1], "Количество сыгранных квизов: 3");
        assert!(lines[2].starts_with("Рекорд: 9/10 ("));
        assert_eq!(lines[3], "Средняя точность: 76.67%");
    }
}
