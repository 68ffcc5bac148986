use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

// =============================================================================
// Upstream constants
// =============================================================================

/// Default base URL for the GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository publishing ICU releases
pub const UPSTREAM_REPOSITORY: &str = "unicode-org/icu";

/// Page size requested from the releases endpoint
pub const RELEASES_PER_PAGE: u32 = 100;

/// User agent sent with every request (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!("icu-retrieval/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Environment variables
// =============================================================================

pub const ENV_API_URL: &str = "ICU_RETRIEVAL_API_URL";
pub const ENV_BUILDPACK_TOML: &str = "ICU_RETRIEVAL_BUILDPACK_TOML";
pub const ENV_OUTPUT: &str = "ICU_RETRIEVAL_OUTPUT";
pub const ENV_LOG_FORMAT: &str = "ICU_RETRIEVAL_LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Retrieval run configuration
///
/// Read from `ICU_RETRIEVAL_*` environment variables; command-line
/// arguments are not consulted.
#[derive(Debug, Clone, Deserialize, PartialEq, Parser)]
#[command(name = "icu-retrieval", version, about = "Retrieve and verify ICU release metadata")]
#[serde(default, rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// Base URL of the GitHub API
    #[arg(long, env = ENV_API_URL, default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// buildpack.toml whose dependencies are already known
    #[arg(long, env = ENV_BUILDPACK_TOML, default_value = "buildpack.toml")]
    pub buildpack_toml: PathBuf,
    /// Destination of the generated metadata
    #[arg(long, env = ENV_OUTPUT, default_value = "output.json")]
    pub output: PathBuf,
    #[arg(long, env = ENV_LOG_FORMAT, value_enum, ignore_case = true, default_value = "compact")]
    pub log_format: LogFormat,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            buildpack_toml: PathBuf::from("buildpack.toml"),
            output: PathBuf::from("output.json"),
            log_format: LogFormat::default(),
        }
    }
}

impl RetrievalConfig {
    /// Builds the configuration from `ICU_RETRIEVAL_*` environment variables
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from([env!("CARGO_PKG_NAME")])
    }
}
