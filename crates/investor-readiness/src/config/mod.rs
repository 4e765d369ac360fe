use crate::evaluation::report::DEFAULT_SCORE_PRECISION;
use crate::evaluation::{ExportOptions, ScoringConfig, ScoringConfigError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const MAX_SCORE_PRECISION: usize = 6;

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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSource,
    pub export: ExportOptions,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring = match env::var("APP_SCORING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => ScoringSource::File(PathBuf::from(path.trim())),
            _ => ScoringSource::Standard,
        };

        let score_precision = match env::var("APP_EXPORT_PRECISION") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|precision| {
                    (DEFAULT_SCORE_PRECISION..=MAX_SCORE_PRECISION).contains(precision)
                })
                .ok_or(ConfigError::InvalidExportPrecision)?,
            Err(_) => DEFAULT_SCORE_PRECISION,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
            export: ExportOptions { score_precision },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the category weights and option scores come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringSource {
    Standard,
    File(PathBuf),
}

impl ScoringSource {
    pub fn load(&self) -> Result<ScoringConfig, ScoringConfigError> {
        match self {
            ScoringSource::Standard => Ok(ScoringConfig::standard()),
            ScoringSource::File(path) => ScoringConfig::from_path(path),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidExportPrecision,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidExportPrecision => write!(
                f,
                "APP_EXPORT_PRECISION must be a whole number between {} and {}",
                DEFAULT_SCORE_PRECISION, MAX_SCORE_PRECISION
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidExportPrecision => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
