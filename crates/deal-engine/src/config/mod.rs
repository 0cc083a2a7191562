use std::env;
use std::fmt;
use std::num::ParseFloatError;

/// Distinguishes runtime behavior for different stages of the tooling.
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

/// Top-level configuration for anything wrapping the engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub underwriting: UnderwritingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let target_dcr = float_var("DEAL_TARGET_DCR", crate::evaluator::DEFAULT_TARGET_DCR)?;
        if target_dcr <= 0.0 {
            return Err(ConfigError::NonPositiveTargetDcr { value: target_dcr });
        }
        let cashflow_threshold_monthly = float_var("DEAL_CASHFLOW_THRESHOLD", 200.0)?;
        let appreciation_rate_percent = float_var("DEAL_APPRECIATION_RATE", 3.0)?;
        let grade_profile =
            env::var("DEAL_GRADE_PROFILE").unwrap_or_else(|_| "balanced".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            underwriting: UnderwritingConfig {
                target_dcr,
                cashflow_threshold_monthly,
                appreciation_rate_percent,
                grade_profile,
            },
        })
    }
}

fn float_var(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|source| ConfigError::InvalidNumber { var, source }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Underwriting defaults injected when a deal file leaves them blank.
#[derive(Debug, Clone)]
pub struct UnderwritingConfig {
    pub target_dcr: f64,
    pub cashflow_threshold_monthly: f64,
    pub appreciation_rate_percent: f64,
    /// Built-in profile name; resolved through `GradeProfile::preset`.
    pub grade_profile: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        var: &'static str,
        source: ParseFloatError,
    },
    NonPositiveTargetDcr {
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var, .. } => {
                write!(f, "{var} must be a valid number")
            }
            ConfigError::NonPositiveTargetDcr { value } => {
                write!(f, "DEAL_TARGET_DCR must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { source, .. } => Some(source),
            ConfigError::NonPositiveTargetDcr { .. } => None,
        }
    }
}
