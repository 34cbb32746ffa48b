//! Configuration management for Interview Service
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! # Example
//!
//! ```no_run
//! use interview_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("Listening on {}", settings.server.addr()?);
//!     Ok(())
//! }
//! ```

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use grpc_jwt_auth::{JwtSecret, SecretError, TokenValidator};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Invalid JWT_SECRET: {0}")]
    Secret(#[from] SecretError),
}

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from the process environment, after reading `.env` if present
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerSettings::from_lookup(&lookup)?,
            jwt: JwtSettings::from_lookup(&lookup)?,
            log: LogSettings::from_lookup(&lookup)?,
        })
    }
}

/// gRPC listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(lookup, "SERVER_PORT", 8080)?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "SERVER_HOST",
                reason: e.to_string(),
            })
    }
}

/// Token verification settings
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: JwtSecret,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_secs: u64,
}

impl JwtSettings {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            secret: JwtSecret::new(secret)?,
            issuer: non_empty(lookup("JWT_ISSUER")),
            audience: non_empty(lookup("JWT_AUDIENCE")),
            leeway_secs: parse_or(lookup, "JWT_LEEWAY_SECS", 0)?,
        })
    }

    pub fn build_validator(&self) -> TokenValidator {
        let mut validator = TokenValidator::new(&self.secret).with_leeway(self.leeway_secs);
        if let Some(issuer) = &self.issuer {
            validator = validator.with_issuer(issuer.clone());
        }
        if let Some(audience) = &self.audience {
            validator = validator.with_audience(audience.clone());
        }
        validator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Turn on tonic/h2 transport logs
    pub grpc_transport: bool,
}

impl LogSettings {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            format: parse_or(lookup, "LOG_FORMAT", LogFormat::Json)?,
            grpc_transport: parse_or(lookup, "LOG_GRPC", false)?,
        })
    }

    /// `EnvFilter` directives to use when `RUST_LOG` is not set
    pub fn default_directives(&self) -> String {
        let mut directives = "interview_service=info,grpc_jwt_auth=info,info".to_string();
        if self.grpc_transport {
            directives.push_str(",tonic=debug,h2=debug,tower=debug");
        }
        directives
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
