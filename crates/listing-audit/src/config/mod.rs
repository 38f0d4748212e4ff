use crate::flow::FlowCanvas;
use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_CANVAS_WIDTH: f64 = 958.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 294.0;
const DEFAULT_BAR_WIDTH: f64 = 40.0;
const DEFAULT_SNAPSHOT_DATE: &str = "2016-10-01";

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
    pub dataset: DatasetConfig,
    pub chart: ChartConfig,
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

        let listings_path = env::var("APP_LISTINGS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let snapshot_raw =
            env::var("APP_SNAPSHOT_DATE").unwrap_or_else(|_| DEFAULT_SNAPSHOT_DATE.to_string());
        let snapshot_date = NaiveDate::parse_from_str(snapshot_raw.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidSnapshotDate(snapshot_raw.clone()))?;

        let chart = ChartConfig {
            canvas_width: dimension_var("APP_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH)?,
            canvas_height: dimension_var("APP_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT)?,
            bar_width: dimension_var("APP_BAR_WIDTH", DEFAULT_BAR_WIDTH)?,
        };

        if chart.bar_width > chart.canvas_width {
            return Err(ConfigError::InvalidDimension {
                name: "APP_BAR_WIDTH",
                value: chart.bar_width.to_string(),
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig {
                listings_path,
                snapshot_date,
            },
            chart,
        })
    }
}

fn dimension_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ConfigError::InvalidDimension { name, value: raw }),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the listing snapshot lives and which day it was scraped.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub listings_path: Option<PathBuf>,
    pub snapshot_date: NaiveDate,
}

/// Pixel dimensions handed to the flow layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub bar_width: f64,
}

impl ChartConfig {
    pub const fn canvas(&self) -> FlowCanvas {
        FlowCanvas::new(self.canvas_width, self.canvas_height, self.bar_width)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDimension { name: &'static str, value: String },
    InvalidSnapshotDate(String),
    MissingListingsPath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDimension { name, value } => {
                write!(f, "{name} must be a non-negative number of pixels (got '{value}')")
            }
            ConfigError::InvalidSnapshotDate(value) => {
                write!(f, "APP_SNAPSHOT_DATE must be YYYY-MM-DD (got '{value}')")
            }
            ConfigError::MissingListingsPath => {
                write!(f, "no listing snapshot given; pass --listings or set APP_LISTINGS_PATH")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidDimension { .. }
            | ConfigError::InvalidSnapshotDate(_)
            | ConfigError::MissingListingsPath => None,
        }
    }
}
