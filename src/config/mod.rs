mod file_config;

pub use file_config::{AnalysisServiceConfig, FileConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_ANALYSIS_URL: &str = "https://youtube-trend-api.onrender.com";
pub const DEFAULT_ANALYSIS_TIMEOUT_SEC: u64 = 300;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub analysis_url: String,
    pub analysis_timeout_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            content_cache_age_sec: 0,
            frontend_dir_path: None,
            analysis_url: DEFAULT_ANALYSIS_URL.to_string(),
            analysis_timeout_sec: DEFAULT_ANALYSIS_TIMEOUT_SEC,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<PathBuf>,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub url: String,
    pub timeout_sec: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port {
            bail!("port and metrics_port must differ (both are {})", port);
        }

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {}", s),
            },
            None => cli.logging_level.clone(),
        };

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone())
            .map(PathBuf::from);
        if let Some(dir) = &frontend_dir_path {
            if !dir.is_dir() {
                bail!("Frontend directory does not exist: {:?}", dir);
            }
        }

        let analysis_file = file.analysis.unwrap_or_default();
        let analysis = AnalysisSettings {
            url: analysis_file.url.unwrap_or_else(|| cli.analysis_url.clone()),
            timeout_sec: analysis_file
                .timeout_sec
                .unwrap_or(cli.analysis_timeout_sec),
        };
        if !(analysis.url.starts_with("http://") || analysis.url.starts_with("https://")) {
            bail!("Analysis service URL must be http(s): {}", analysis.url);
        }
        if analysis.timeout_sec == 0 {
            bail!("Analysis timeout must be greater than zero");
        }

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            analysis,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
