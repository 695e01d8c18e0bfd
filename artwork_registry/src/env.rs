use std::path::{Path, PathBuf};

use tracing::info;

/// Whether a local `.env` file was applied to the process environment.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvFileStatus {
    Loaded(PathBuf),
    NotLoaded(String),
}

impl EnvFileStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, EnvFileStatus::Loaded(_))
    }

    /// Short status line for the dashboard sidebar.
    pub fn status_line(&self) -> &'static str {
        match self {
            EnvFileStatus::Loaded(_) => "dotenv loaded",
            EnvFileStatus::NotLoaded(_) => "dotenv loading failed",
        }
    }
}

/// Look for a `.env` in the working directory or its parents. Absence is not an error.
pub fn load_env_file() -> EnvFileStatus {
    report(dotenv::dotenv().map_err(|e| e.to_string()))
}

pub fn load_env_file_from(path: &Path) -> EnvFileStatus {
    report(
        dotenv::from_path(path)
            .map(|_| path.to_path_buf())
            .map_err(|e| e.to_string()),
    )
}

fn report(result: Result<PathBuf, String>) -> EnvFileStatus {
    let status = match result {
        Ok(path) => EnvFileStatus::Loaded(path),
        Err(reason) => EnvFileStatus::NotLoaded(reason),
    };
    match &status {
        EnvFileStatus::Loaded(path) => info!(path = %path.display(), "{}", status.status_line()),
        EnvFileStatus::NotLoaded(reason) => info!(%reason, "{}", status.status_line()),
    }
    status
}
