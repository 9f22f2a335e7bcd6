use std::{
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use anyhow::Result;
use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};

use super::QuizDisplay;
use crate::{
    models::{AlertModel, Poster, QuizStep},
    quiz::QuizScreen,
};

/// Text rendering of the quiz for terminals.
pub struct ConsoleDisplay {
    out: Mutex<Box<dyn Write + Send>>,
    alert: Mutex<Option<AlertModel>>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            alert: Mutex::new(None),
        }
    }

    /// The dialog waiting for the user, if any.
    pub fn take_alert(&self) -> Option<AlertModel> {
        self.alert
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn has_alert(&self) -> bool {
        self.alert
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            debug!("console write failed: {err}");
        }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_poster(poster: &Poster) -> String {
    match poster.meta() {
        Some(meta) => format!(
            "[постер {:?} {}x{}, {} байт]",
            meta.format,
            meta.width,
            meta.height,
            poster.bytes().len()
        ),
        None => "[постер недоступен]".to_string(),
    }
}

impl QuizDisplay for ConsoleDisplay {
    fn show_step(&self, step: QuizStep) {
        self.write(&format!(
            "\nВопрос: {}\n{}\n{}\n(y/n)",
            step.question_number,
            describe_poster(&step.poster),
            step.question
        ));
    }

    fn show_alert(&self, alert: AlertModel) {
        self.write(&format!(
            "\n== {} ==\n{}\n[Enter] {}",
            alert.title, alert.message, alert.button_text
        ));
        *self.alert.lock().unwrap_or_else(PoisonError::into_inner) = Some(alert);
    }

    fn highlight_answer(&self, is_correct: bool) {
        self.write(if is_correct { "Верно!" } else { "Неверно." });
    }

    fn show_loading(&self) {
        self.write("Загрузка...");
    }

    fn hide_loading(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Yes,
    No,
    Confirm,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" | "д" | "да" => Command::Yes,
            "n" | "no" | "н" | "нет" => Command::No,
            "" => Command::Confirm,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

/// Line-based keyboard input for a [`QuizScreen`] drawn by a [`ConsoleDisplay`].
pub struct ConsoleInput<R> {
    lines: Lines<BufReader<R>>,
}

impl ConsoleInput<Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> ConsoleInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    /// Feed input to the screen until `q` or end of input.
    pub async fn run(mut self, screen: &QuizScreen, display: &ConsoleDisplay) -> Result<()> {
        while let Some(line) = self.lines.next_line().await? {
            match Command::parse(&line) {
                Command::Yes | Command::No if display.has_alert() => {
                    display.write("Нажмите Enter, чтобы продолжить.")
                }
                Command::Yes => screen.yes_tapped(),
                Command::No => screen.no_tapped(),
                Command::Confirm => match display.take_alert() {
                    Some(alert) => alert.dismiss(),
                    None => debug!("nothing to confirm"),
                },
                Command::Quit => break,
                Command::Unknown => display.write("Ответьте y или n, q для выхода."),
            }
        }
        Ok(())
    }
}
