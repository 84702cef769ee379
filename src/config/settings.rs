//! User settings for FinBud
//!
//! Holds the active user identity, display preferences and the lesson
//! points formula.

use serde::{Deserialize, Serialize};

use super::paths::FinbudPaths;
use crate::error::FinbudError;
use crate::models::{PointsFormula, ReportingPeriod, UserId};
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Settings persisted in `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Identity every store call is scoped to
    #[serde(default)]
    pub active_user: UserId,

    /// Period shown when none is given on the command line
    #[serde(default)]
    pub default_period: ReportingPeriod,

    /// Points awarded per lesson
    #[serde(default)]
    pub lesson_points: PointsFormula,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            active_user: UserId::new(),
            default_period: ReportingPeriod::default(),
            lesson_points: PointsFormula::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings, or create and save defaults on first run
    pub fn load_or_create(paths: &FinbudPaths) -> Result<Self, FinbudError> {
        let path = paths.settings_file();
        if path.exists() {
            return read_json_required(&path)
                .map_err(|e| FinbudError::Config(format!("Failed to load settings: {}", e)));
        }

        let settings = Self::default();
        settings.save(paths)?;
        Ok(settings)
    }

    pub fn save(&self, paths: &FinbudPaths) -> Result<(), FinbudError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_period, ReportingPeriod::Month);
        assert_eq!(settings.lesson_points.base, 25);
        assert_eq!(settings.lesson_points.increment, 5);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_load_or_create_persists_identity() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbudPaths::with_base_dir(temp_dir.path().to_path_buf());

        let first = Settings::load_or_create(&paths).unwrap();
        assert!(paths.settings_file().exists());

        let second = Settings::load_or_create(&paths).unwrap();
        assert_eq!(first.active_user, second.active_user);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbudPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_period": "week"}"#).unwrap();

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.default_period, ReportingPeriod::Week);
        assert_eq!(settings.schema_version, 1);
    }
}
