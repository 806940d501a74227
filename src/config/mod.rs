use std::env;
use std::fmt;
use std::path::PathBuf;

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
    pub data: DataConfig,
    pub engine: EngineSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let corpus_path = env::var("GUIDANCE_CORPUS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/graduates.csv"));
        let profiles_path = env::var("GUIDANCE_PROFILES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/profiles.json"));
        let catalog_path = env::var("GUIDANCE_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let recommend_limit = parse_var("GUIDANCE_RECOMMEND_LIMIT", "5")?;
        let gpa_tolerance: f64 = parse_var("GUIDANCE_GPA_TOLERANCE", "0.5")?;
        if !gpa_tolerance.is_finite() || gpa_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(gpa_tolerance));
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            data: DataConfig {
                corpus_path,
                profiles_path,
                catalog_path,
            },
            engine: EngineSettings {
                recommend_limit,
                gpa_tolerance,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(variable).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { variable, value })
}

/// Locations of the graduate snapshot and the profile store.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub corpus_path: PathBuf,
    pub profiles_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
}

/// Engine tunables that operators may override per deployment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub recommend_limit: usize,
    pub gpa_tolerance: f64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a valid number (got '{value}')")
            }
            ConfigError::InvalidTolerance(value) => {
                write!(
                    f,
                    "GUIDANCE_GPA_TOLERANCE must be a finite, non-negative number (got {value})"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

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
        env::remove_var("GUIDANCE_CORPUS_PATH");
        env::remove_var("GUIDANCE_PROFILES_PATH");
        env::remove_var("GUIDANCE_CATALOG_PATH");
        env::remove_var("GUIDANCE_RECOMMEND_LIMIT");
        env::remove_var("GUIDANCE_GPA_TOLERANCE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.data.corpus_path, PathBuf::from("data/graduates.csv"));
        assert_eq!(config.data.profiles_path, PathBuf::from("data/profiles.json"));
        assert!(config.data.catalog_path.is_none());
        assert_eq!(config.engine.recommend_limit, 5);
        assert_eq!(config.engine.gpa_tolerance, 0.5);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("GUIDANCE_RECOMMEND_LIMIT", "8");
        env::set_var("GUIDANCE_GPA_TOLERANCE", "0.25");
        env::set_var("GUIDANCE_CATALOG_PATH", "catalog.json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.engine.recommend_limit, 8);
        assert_eq!(config.engine.gpa_tolerance, 0.25);
        assert_eq!(config.data.catalog_path, Some(PathBuf::from("catalog.json")));
        reset_env();
    }

    #[test]
    fn rejects_malformed_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GUIDANCE_RECOMMEND_LIMIT", "five");
        let err = AppConfig::load().expect_err("limit must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                variable: "GUIDANCE_RECOMMEND_LIMIT",
                ..
            }
        ));

        reset_env();
        env::set_var("GUIDANCE_GPA_TOLERANCE", "-0.1");
        let err = AppConfig::load().expect_err("negative tolerance rejected");
        assert!(matches!(err, ConfigError::InvalidTolerance(_)));
        reset_env();
    }
}
