use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

/// Overrides the directory statistics and settings are kept in.
pub const DATA_DIR_ENV: &str = "MOVIE_QUIZ_DATA_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsBackendKind {
    #[default]
    Json,
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub questions_amount: u32,
    pub debounce_ms: u64,
    pub feedback_delay_ms: u64,
    pub statistics_backend: StatisticsBackendKind,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_amount: 10,
            debounce_ms: 400,
            feedback_delay_ms: 1000,
            statistics_backend: StatisticsBackendKind::default(),
        }
    }
}

impl QuizSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions_amount == 0 {
            bail!("questions_amount must be at least 1");
        }
        if self.debounce_ms == 0 {
            bail!("debounce_ms must be greater than zero");
        }
        if self.feedback_delay_ms == 0 {
            bail!("feedback_delay_ms must be greater than zero");
        }
        Ok(())
    }
}

/// Where persistent state lives: `$MOVIE_QUIZ_DATA_DIR`, else the platform
/// data directory, else the working directory.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("", "", "movie-quiz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// JSON-backed settings file. A missing file yields defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<QuizSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = Self::read(&path)?;
        data.validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> QuizSettings {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn update(&self, settings: QuizSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    fn read(path: &Path) -> Result<QuizSettings> {
        if !path.exists() {
            return Ok(QuizSettings::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!(
                "Ignoring unreadable settings in {}: {err}",
                path.display()
            );
            QuizSettings::default()
        }))
    }

    fn persist(&self, data: &QuizSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
