//! User settings for spendboard
//!
//! Manages display preferences, the default filter window and the audit
//! trail switch.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::SpendboardPaths;
use crate::error::SpendError;
use crate::models::Currency;
use crate::services::filter::DateWindow;

/// User settings for spendboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ledger currency
    #[serde(default)]
    pub currency: Currency,

    /// Date format used in tables (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Start of the date window filters reset to
    #[serde(default = "default_start_date")]
    pub default_start_date: NaiveDate,

    /// End of the date window filters reset to
    #[serde(default = "default_end_date")]
    pub default_end_date: NaiveDate,

    /// Width in characters of a full bar in breakdown charts
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    /// Whether created and deleted records are written to the audit log
    #[serde(default)]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default()
}

fn default_chart_width() -> usize {
    40
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            date_format: default_date_format(),
            default_start_date: default_start_date(),
            default_end_date: default_end_date(),
            chart_width: default_chart_width(),
            audit_enabled: false,
        }
    }
}

impl Settings {
    /// The date window a cleared filter starts from
    pub fn default_window(&self) -> DateWindow {
        DateWindow::new(self.default_start_date, self.default_end_date)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendboardPaths) -> Result<Self, SpendError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values the display code can't use
    pub fn validate(&self) -> Result<(), SpendError> {
        if self.chart_width == 0 {
            return Err(SpendError::Config(
                "chart_width must be greater than zero".into(),
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(SpendError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendboardPaths) -> Result<(), SpendError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SpendError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency, Currency::Eur);
        assert_eq!(settings.chart_width, 40);
        assert!(!settings.audit_enabled);

        let window = settings.default_window();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.audit_enabled = true;
        settings.default_start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        settings.save(&paths).unwrap();
        assert!(paths.is_initialized());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"audit_enabled": true}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.audit_enabled);
        assert_eq!(loaded.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_zero_chart_width_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"chart_width": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, SpendError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let settings = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
        assert!(Settings::default().validate().is_ok());
    }
}
