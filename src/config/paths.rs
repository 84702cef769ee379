//! Path management for FinBud
//!
//! ## Path Resolution Order
//!
//! 1. `FINBUD_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finbud` or `~/.config/finbud`
//! 3. Windows: `%APPDATA%\finbud`

use std::path::PathBuf;

use crate::error::FinbudError;

/// Manages all paths used by FinBud
#[derive(Debug, Clone)]
pub struct FinbudPaths {
    base_dir: PathBuf,
}

impl FinbudPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, FinbudError> {
        let base_dir = match std::env::var("FINBUD_DATA_DIR") {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per table
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn lessons_file(&self) -> PathBuf {
        self.data_dir().join("lessons.json")
    }

    pub fn progress_file(&self) -> PathBuf {
        self.data_dir().join("progress.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    pub fn profiles_file(&self) -> PathBuf {
        self.data_dir().join("profiles.json")
    }

    /// Badge catalog
    pub fn badges_file(&self) -> PathBuf {
        self.data_dir().join("badges.json")
    }

    pub fn user_badges_file(&self) -> PathBuf {
        self.data_dir().join("user_badges.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), FinbudError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinbudError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinbudError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `finbud init` has run here
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinbudError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("finbud"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| FinbudError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("finbud"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinbudError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinbudError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finbud"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbudPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.goals_file(),
            temp_dir.path().join("data").join("goals.json")
        );
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbudPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
