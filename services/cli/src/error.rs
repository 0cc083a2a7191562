use deal_engine::config::ConfigError;
use deal_engine::rent_roll::RentRollImportError;
use deal_engine::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    DealFile(serde_json::Error),
    RentRoll(RentRollImportError),
    UnknownProfile(String),
    InsufficientInputs,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::DealFile(err) => write!(f, "invalid deal file: {err}"),
            AppError::RentRoll(err) => write!(f, "rent roll import failed: {err}"),
            AppError::UnknownProfile(name) => write!(
                f,
                "unknown grade profile '{name}' (expected balanced, cash-flow, or appreciation)"
            ),
            AppError::InsufficientInputs => write!(
                f,
                "the deal is missing financing inputs (purchase price, down payment, rate, or term)"
            ),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::DealFile(err) => Some(err),
            AppError::RentRoll(err) => Some(err),
            AppError::UnknownProfile(_) | AppError::InsufficientInputs => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::DealFile(value)
    }
}

impl From<RentRollImportError> for AppError {
    fn from(value: RentRollImportError) -> Self {
        Self::RentRoll(value)
    }
}
