use anyhow::{Context, Result};
use smartspend_io::JsonFileStore;
use std::fs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "SMARTSPEND_HOME";

/// Data directory: `--data-dir`, then `$SMARTSPEND_HOME`, then `~/.smartspend`.
pub fn smartspend_home(data_dir: Option<&Path>) -> Result<PathBuf> {
    resolve_home(
        data_dir,
        std::env::var(HOME_ENV).ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_home(
    data_dir: Option<&Path>,
    override_home: Option<String>,
    home: Option<String>,
) -> Result<PathBuf> {
    if let Some(dir) = data_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = override_home.filter(|s| !s.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home.context("HOME is not set (pass --data-dir or set SMARTSPEND_HOME)")?;
    Ok(PathBuf::from(home).join(".smartspend"))
}

pub fn ensure_smartspend_home(data_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = smartspend_home(data_dir)?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn open_store(home: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(home).with_context(|| format!("open store at {}", home.display()))
}
