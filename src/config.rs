use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "ROSTER_HOME";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".roster-keeper";
/// SQLite file name stored inside the data directory.
const DB_FILE_NAME: &str = "roster.sqlite";

/// Where the application keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    home: PathBuf,
}

impl Config {
    /// Use `home` when given (from `--home` or `ROSTER_HOME`), otherwise a
    /// dot-directory inside the user's home.
    pub fn resolve(home: Option<PathBuf>) -> Result<Self> {
        let home = match home {
            Some(home) => home,
            None => default_home()?,
        };
        Ok(Self { home })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn db_path(&self) -> PathBuf {
        self.home.join(DB_FILE_NAME)
    }
}

fn default_home() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
