use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_path: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub read_pool_size: Option<usize>,
    pub frontend_dir_path: Option<String>,

    pub analytics: Option<AnalyticsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub valid_year_min_results: Option<i64>,
    pub max_margins_limit: Option<usize>,
    pub default_listing_limit: Option<usize>,
    pub max_listing_limit: Option<usize>,
    pub include_unknown_education: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
