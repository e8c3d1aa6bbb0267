// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use crate::core::config::Config;

pub mod parser;

pub struct LoadedConfig {
    pub cfg: Config,
    /// None when running on built-in defaults.
    pub path: Option<PathBuf>,
}

/// Candidate locations, most specific first.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("restwatch").join("restwatch.rune"));
    }
    paths.push(PathBuf::from("/etc/restwatch/restwatch.rune"));
    paths
}

/// An explicit path must exist; otherwise the first existing default wins.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(eyre::eyre!("config file {} does not exist", path.display()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    Ok(default_config_paths().into_iter().find(|p| p.exists()))
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    parser::parse_str(&text).wrap_err_with(|| format!("failed to load {}", path.display()))
}

pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    match resolve_config_path(explicit)? {
        Some(path) => {
            let cfg = load_from_path(&path)?;
            eventline::info!("config: loaded {}", path.display());
            Ok(LoadedConfig { cfg, path: Some(path) })
        }
        None => {
            eventline::debug!("config: no config file found, using built-in defaults");
            Ok(LoadedConfig { cfg: Config::default(), path: None })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.rune");
        assert!(resolve_config_path(Some(&path)).is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("restwatch.rune");
        fs::write(
            &path,
            "restwatch:\n  rest_threshold 240\n  work_threshold 1200\nend\n",
        )
        .unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.cfg.thresholds.poll_secs(), 120);
        assert_eq!(loaded.cfg.thresholds.work_secs(), 1200);
    }

    #[test]
    fn invalid_values_name_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("restwatch.rune");
        fs::write(&path, "restwatch:\n  work_threshold 0\nend\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("restwatch.rune"));
    }
}
