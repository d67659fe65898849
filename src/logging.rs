// ABOUTME: Logging configuration and structured logging setup for the suggestion engine
// ABOUTME: Subscriber installation from environment plus the pipeline log events shared by both services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! The engine only emits `tracing` events. Hosts that do not install their own
//! subscriber can call [`init_from_env`] once at startup.

use std::env;
use std::io;

use anyhow::{anyhow, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::types::Environment;
use crate::constants::service_names;
use crate::suggestions::GenerationError;

/// HTTP client crates capped at `warn` regardless of `RUST_LOG`
const NOISY_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error, or any `EnvFilter` directive string)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread ids and names
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name reported at startup
    pub service_name: String,
    /// Service version reported at startup
    pub service_version: String,
    /// Deployment environment
    pub environment: Environment,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One `JSON` object per event, for log shippers
    Json,
    /// Human-readable multi-field lines (default)
    #[default]
    Pretty,
    /// Single-line events without location or target
    Compact,
}

impl LogFormat {
    /// Parse from string with fallback to `Pretty`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::FITCOACH_ENGINE.to_owned(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: Environment::Development,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// Production turns on location, thread, and span output; elsewhere each
    /// is enabled by setting `LOG_INCLUDE_LOCATION`, `LOG_INCLUDE_THREAD`, or
    /// `LOG_INCLUDE_SPANS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT")
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();
        let verbose = |key: &str| environment.is_production() || env::var(key).is_ok();

        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map(|v| LogFormat::from_str_or_default(&v))
                .unwrap_or_default(),
            include_location: verbose("LOG_INCLUDE_LOCATION"),
            include_thread: verbose("LOG_INCLUDE_THREAD"),
            include_spans: verbose("LOG_INCLUDE_SPANS"),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
            environment,
        }
    }

    /// Build the filter: the configured level plus fixed caps for HTTP crates
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let filter = NOISY_TARGETS.iter().fold(EnvFilter::new(&self.level), |filter, target| {
            filter.add_directive(
                format!("{target}=warn")
                    .parse()
                    .unwrap_or_else(|_| Level::WARN.into()),
            )
        });
        filter.add_directive(
            format!("fitcoach_engine={}", self.level)
                .parse()
                .unwrap_or_else(|_| Level::INFO.into()),
        )
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let layer = match self.format {
            LogFormat::Json => fmt::layer()
                .json()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread)
                .with_thread_names(self.include_thread)
                .with_span_events(self.span_events())
                .with_writer(io::stdout)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread)
                .with_thread_names(self.include_thread)
                .with_span_events(self.span_events())
                .with_writer(io::stdout)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stdout)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(layer)
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "FitCoach engine logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Pipeline log events shared by the suggestion and plan services
pub struct EngineLogger;

impl EngineLogger {
    /// The primary generator failed and the rule-based one takes over
    pub fn log_generator_fallback(pipeline: &str, generator: &str, error: &GenerationError) {
        warn!(
            pipeline,
            generator,
            error.kind = error.kind(),
            error.transient = error.is_transient(),
            error.message = %error,
            "Primary generator failed, falling back to rule-based selection"
        );
    }

    /// Outcome of one suggestion run
    pub fn log_pipeline_summary(
        pipeline: &str,
        generator: &str,
        requested: usize,
        produced: usize,
        groups: usize,
    ) {
        info!(
            pipeline,
            generator,
            requested,
            produced,
            groups,
            "Suggestion pipeline completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn test_default_config_uses_service_name() {
        let config = LoggingConfig::default();
        assert_eq!(config.service_name, "fitcoach-engine");
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.include_spans);
    }

    #[test]
    fn test_env_filter_caps_http_crates() {
        let filter = LoggingConfig::default().env_filter().to_string();
        assert!(filter.contains("reqwest=warn"));
        assert!(filter.contains("fitcoach_engine=info"));
    }
}
