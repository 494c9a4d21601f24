use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let window_days = match env::var("APP_WINDOW_DAYS") {
            Ok(raw) => parse_window_days(&raw)?,
            Err(_) => DEFAULT_WINDOW_DAYS,
        };

        let output_dir = env::var("APP_OUTPUT_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            report: ReportConfig {
                window_days,
                output_dir,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Defaults applied to report generation when the caller does not override them.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub window_days: u32,
    /// Where rendered reports are written. `None` means next to the source CSV.
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            output_dir: None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn parse_window_days(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(ConfigError::InvalidWindowDays {
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWindowDays { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWindowDays { value } => write!(
                f,
                "APP_WINDOW_DAYS must be a positive whole number of days (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
