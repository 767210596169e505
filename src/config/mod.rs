//! Configuration management for the course API

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Apply embedded migrations before serving
    pub run_migrations: bool,
    /// Telemetry configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Logging and metrics configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Install the Prometheus recorder and expose `/metrics`
    pub metrics_enabled: bool,
    /// "pretty" or "json"
    pub log_format: String,
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            log_format: "pretty".to_string(),
            service_name: "course-api".to_string(),
        }
    }
}

impl TelemetryConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            metrics_enabled: env_flag("METRICS_ENABLED", defaults.metrics_enabled),
            log_format: env::var("LOG_FORMAT")
                .map(|s| s.to_lowercase())
                .unwrap_or(defaults.log_format),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            run_migrations: env_flag("RUN_MIGRATIONS", true),
            telemetry: TelemetryConfig::from_env(),
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|s| parse_flag(&s).unwrap_or(default))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
