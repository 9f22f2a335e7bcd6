pub mod display;
pub mod models;
pub mod quiz;
pub mod settings;
pub mod source;
pub mod statistics;
pub mod storage;
mod utils;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use display::{ConsoleDisplay, ConsoleInput};
use quiz::QuizScreen;
use settings::{QuizSettings, SettingsStore, StatisticsBackendKind};
use source::{MovieQuestionSource, QuestionSource, StaticQuestionSource};
use statistics::{StatisticService, StatisticsStore};
use storage::{JsonFileBackend, KeyValueBackend, MemoryBackend, SqliteBackend};

/// Answer yes/no questions about film ratings in the terminal.
#[derive(Debug, Parser)]
#[command(name = "movie-quiz", version)]
pub struct Cli {
    /// JSON list of movies to ask about. Defaults to the built-in deck.
    #[arg(long)]
    pub movies: Option<PathBuf>,
    /// Settings file. Defaults to settings.json in the data directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Where statistics are kept. Overrides the settings file.
    #[arg(long, value_enum)]
    pub backend: Option<StatisticsBackendKind>,
}

/// Open the key/value store statistics are persisted in.
pub fn open_backend(
    kind: StatisticsBackendKind,
    data_dir: &std::path::Path,
) -> Result<Arc<dyn KeyValueBackend>> {
    let backend: Arc<dyn KeyValueBackend> = match kind {
        StatisticsBackendKind::Json => {
            Arc::new(JsonFileBackend::new(data_dir.join("statistics.json"))?)
        }
        StatisticsBackendKind::Sqlite => {
            Arc::new(SqliteBackend::new(data_dir.join("movie-quiz.sqlite3"))?)
        }
        StatisticsBackendKind::Memory => Arc::new(MemoryBackend::new()),
    };
    Ok(backend)
}

pub fn run() -> Result<()> {
    let debug_mode = std::env::var("MOVIE_QUIZ_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    env_logger::Builder::from_default_env()
        .filter_level(if debug_mode {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let cli = Cli::parse();
    log::info!("Movie quiz starting up...");

    let data_dir = settings::data_dir();
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join("settings.json"));
    let settings_store = SettingsStore::new(settings_path)?;
    let mut settings = settings_store.settings();
    if !settings_store.path().exists() {
        // Leave an editable file behind on first run.
        if let Err(err) = settings_store.update(settings.clone()) {
            log::warn!("could not write default settings: {err:#}");
        }
    }
    if let Some(backend) = cli.backend {
        settings.statistics_backend = backend;
    }

    let statistics: Arc<dyn StatisticService> = Arc::new(StatisticsStore::new(open_backend(
        settings.statistics_backend,
        &data_dir,
    )?));
    let source: Arc<dyn QuestionSource> = match cli.movies {
        Some(path) => Arc::new(MovieQuestionSource::new(path)),
        None => Arc::new(StaticQuestionSource::builtin()),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(play(source, statistics, &settings))
}

async fn play(
    source: Arc<dyn QuestionSource>,
    statistics: Arc<dyn StatisticService>,
    settings: &QuizSettings,
) -> Result<()> {
    let display = Arc::new(ConsoleDisplay::new());
    let screen = QuizScreen::open(display.clone(), source, statistics, settings);

    let result = ConsoleInput::stdin().run(&screen, &display).await;
    screen.close().await;
    result
}
