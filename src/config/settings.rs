//! User settings for the budget guard
//!
//! Display preferences and the fallback profile policy.

use serde::{Deserialize, Serialize};

use super::paths::GuardPaths;
use crate::error::GuardError;
use crate::models::{Money, Profile, DEFAULT_FALLBACK_INCOME};

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Income assumed when no profile is available, in minor units
    #[serde(default = "default_fallback_income")]
    pub fallback_monthly_income: Money,

    /// Whether to compute provisional figures from the fallback profile
    /// instead of failing when the profile is missing
    #[serde(default = "default_use_fallback")]
    pub use_fallback_profile: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_fallback_income() -> Money {
    DEFAULT_FALLBACK_INCOME
}

fn default_use_fallback() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            fallback_monthly_income: default_fallback_income(),
            use_fallback_profile: default_use_fallback(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// The fallback profile the caller hands to the engine, if enabled
    pub fn fallback_profile(&self) -> Option<Profile> {
        self.use_fallback_profile
            .then(|| Profile::fallback(self.fallback_monthly_income))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &GuardPaths) -> Result<Self, GuardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| GuardError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GuardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.fallback_monthly_income.is_negative() {
                return Err(GuardError::Config(
                    "fallback_monthly_income cannot be negative".into(),
                ));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GuardPaths) -> Result<(), GuardError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GuardError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| GuardError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
