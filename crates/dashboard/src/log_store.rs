use async_trait::async_trait;
use log::debug;
use mailmind_core::logs::{self, LogTable, PeriodSelector};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to join log loading task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Read access to the daily log files. Every call loads a fresh copy.
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn load_period(&self, selector: PeriodSelector) -> Result<LogTable, Error>;
    /// Every log file in the directory, used for the long-run averages
    async fn load_all(&self) -> Result<LogTable, Error>;
}

pub struct FileLogStore {
    logs_dir: PathBuf,
}

impl FileLogStore {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }
}

#[async_trait]
impl LogStore for FileLogStore {
    async fn load_period(&self, selector: PeriodSelector) -> Result<LogTable, Error> {
        let dir = self.logs_dir.clone();
        let table =
            tokio::task::spawn_blocking(move || logs::load_period(&dir, &selector)).await?;
        debug!(
            "loaded {} records for {} from {}",
            table.len(),
            selector.label(),
            self.logs_dir.display()
        );
        Ok(table)
    }

    async fn load_all(&self) -> Result<LogTable, Error> {
        let dir = self.logs_dir.clone();
        Ok(tokio::task::spawn_blocking(move || logs::load_all(&dir)).await?)
    }
}
