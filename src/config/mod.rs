mod file_config;

pub use file_config::{AnalyticsConfig, FileConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,
    pub frontend_dir_path: Option<String>,

    pub analytics: AnalyticsSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified via --db-path or in config file")
            })?;

        // A missing file is fine (an empty schema gets created), a missing
        // parent directory is not.
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let read_pool_size = file.read_pool_size.unwrap_or(cli.read_pool_size);
        if read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let defaults = AnalyticsSettings::default();
        let analytics_file = file.analytics.unwrap_or_default();
        let analytics = AnalyticsSettings {
            valid_year_min_results: analytics_file
                .valid_year_min_results
                .unwrap_or(defaults.valid_year_min_results),
            max_margins_limit: analytics_file
                .max_margins_limit
                .unwrap_or(defaults.max_margins_limit),
            default_listing_limit: analytics_file
                .default_listing_limit
                .unwrap_or(defaults.default_listing_limit),
            max_listing_limit: analytics_file
                .max_listing_limit
                .unwrap_or(defaults.max_listing_limit),
            include_unknown_education: analytics_file
                .include_unknown_education
                .unwrap_or(defaults.include_unknown_education),
        };
        analytics.validate()?;

        Ok(Self {
            db_path,
            port,
            metrics_port,
            logging_level,
            read_pool_size,
            frontend_dir_path,
            analytics,
        })
    }
}

/// Tunables of the metric engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSettings {
    /// A year counts as valid only with at least this many result rows.
    pub valid_year_min_results: i64,
    pub max_margins_limit: usize,
    pub default_listing_limit: usize,
    pub max_listing_limit: usize,
    /// Bucket blank education values as "Unknown" instead of dropping them.
    pub include_unknown_education: bool,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            valid_year_min_results: 1000,
            max_margins_limit: 100,
            default_listing_limit: 100,
            max_listing_limit: 1000,
            include_unknown_education: false,
        }
    }
}

impl AnalyticsSettings {
    fn validate(&self) -> Result<()> {
        if self.valid_year_min_results < 0 {
            bail!("valid_year_min_results cannot be negative");
        }
        if self.max_margins_limit == 0 {
            bail!("max_margins_limit must be at least 1");
        }
        if self.max_listing_limit == 0 {
            bail!("max_listing_limit must be at least 1");
        }
        if self.default_listing_limit == 0 || self.default_listing_limit > self.max_listing_limit
        {
            bail!(
                "default_listing_limit must be between 1 and max_listing_limit ({})",
                self.max_listing_limit
            );
        }
        Ok(())
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
