use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Executor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorConfig {
    /// Number of worker threads in the pool.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Upper bound in seconds on how long result collection waits for a job.
    /// `None` waits indefinitely.
    #[serde(default)]
    pub task_timeout_secs: Option<u64>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            task_timeout_secs: None,
        }
    }
}

impl ExecutorConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}
