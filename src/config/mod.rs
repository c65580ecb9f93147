use chrono::NaiveDate;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub kpi: KpiConfig,
    pub import: ImportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let months_back = env::var("KPI_MONTHS_BACK")
            .unwrap_or_else(|_| KpiConfig::DEFAULT_MONTHS_BACK.to_string())
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidMonthsBack)?;

        let epoch = match env::var("KPI_EPOCH") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|source| ConfigError::InvalidEpoch { value: raw, source })?,
            Err(_) => KpiConfig::default_epoch(),
        };

        let max_rows = env::var("IMPORT_MAX_ROWS")
            .unwrap_or_else(|_| ImportConfig::DEFAULT_MAX_ROWS.to_string())
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|rows| *rows > 0)
            .ok_or(ConfigError::InvalidMaxRows)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            kpi: KpiConfig { months_back, epoch },
            import: ImportConfig { max_rows },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied when a KPI query does not name its own window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiConfig {
    pub months_back: u32,
    /// The default window never reaches before this month.
    pub epoch: NaiveDate,
}

impl KpiConfig {
    pub const DEFAULT_MONTHS_BACK: u32 = 6;

    pub fn default_epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            months_back: Self::DEFAULT_MONTHS_BACK,
            epoch: Self::default_epoch(),
        }
    }
}

/// Limits for a single import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    pub max_rows: usize,
}

impl ImportConfig {
    pub const DEFAULT_MAX_ROWS: usize = 5000;
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_rows: Self::DEFAULT_MAX_ROWS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMonthsBack,
    InvalidEpoch {
        value: String,
        source: chrono::ParseError,
    },
    InvalidMaxRows,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMonthsBack => {
                write!(f, "KPI_MONTHS_BACK must be a non-negative whole number")
            }
            ConfigError::InvalidEpoch { value, .. } => {
                write!(f, "KPI_EPOCH must be a YYYY-MM-DD date, got '{}'", value)
            }
            ConfigError::InvalidMaxRows => {
                write!(f, "IMPORT_MAX_ROWS must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidMonthsBack | ConfigError::InvalidMaxRows => None,
            ConfigError::InvalidEpoch { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("KPI_MONTHS_BACK");
        env::remove_var("KPI_EPOCH");
        env::remove_var("IMPORT_MAX_ROWS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.kpi, KpiConfig::default());
        assert_eq!(config.import.max_rows, 5000);
    }

    #[test]
    fn reads_kpi_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("KPI_MONTHS_BACK", "12");
        env::set_var("KPI_EPOCH", "2022-07-01");
        env::set_var("IMPORT_MAX_ROWS", "250");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.kpi.months_back, 12);
        assert_eq!(
            config.kpi.epoch,
            NaiveDate::from_ymd_opt(2022, 7, 1).expect("valid date")
        );
        assert_eq!(config.import.max_rows, 250);
        reset_env();
    }

    #[test]
    fn rejects_malformed_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("KPI_EPOCH", "January");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidEpoch { .. })
        ));

        reset_env();
        env::set_var("IMPORT_MAX_ROWS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidMaxRows)
        ));

        reset_env();
        env::set_var("KPI_MONTHS_BACK", "-3");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidMonthsBack)
        ));
        reset_env();
    }
}
