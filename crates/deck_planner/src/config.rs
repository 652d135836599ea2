use crate::error::{PlannerError, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

const ENV_STATE_DIR: &str = "DECK_PLANNER_STATE_DIR";
const ENV_OUTPUT_DIR: &str = "DECK_PLANNER_OUTPUT_DIR";

const DEFAULT_STATE_DIR: &str = ".deck_planner";
const DEFAULT_OUTPUT_DIR: &str = "csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 前回の入力を保存するディレクトリ
    pub state_dir: PathBuf,
    /// CSV の出力先
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = dir_from_env(ENV_STATE_DIR)? {
            config.state_dir = path;
        }
        if let Some(path) = dir_from_env(ENV_OUTPUT_DIR)? {
            config.output_dir = path;
        }
        Ok(config)
    }
}

/// Empty or whitespace-only values count as unset.
fn dir_from_env(key: &str) -> Result<Option<PathBuf>> {
    let Ok(value) = env::var(key) else {
        return Ok(None);
    };
    if value.trim().is_empty() {
        return Ok(None);
    }

    let path = PathBuf::from(value);
    reject_non_directory(&path)?;
    Ok(Some(path))
}

// If the path already exists but is not a directory, reject early.
fn reject_non_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(PlannerError::InvalidConfiguration(format!(
            "Path is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}
