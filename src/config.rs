use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const NOTES_FILE: &str = "notes.json";
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;
pub const MAX_FILES: usize = 10;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: try_load("NOTES_HOST", "0.0.0.0"),
            port: try_load("NOTES_PORT", "5001"),
            data_dir: try_load("NOTES_DATA_DIR", "data"),
            uploads_dir: try_load("NOTES_UPLOADS_DIR", "uploads"),
            cors_origins: split_origins(&try_load::<String>("NOTES_CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
        }
    }

    /// Config rooted at `dir`, used by tests and embedders.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: dir.join("data"),
            uploads_dir: dir.join("uploads"),
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }

    pub fn notes_file(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let parse_default = || {
        default
            .parse()
            .unwrap_or_else(|_| unreachable!("default for {key} must parse"))
    };

    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            parse_default()
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            parse_default()
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
