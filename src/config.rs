use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".sprint-report.toml";

/// Env var naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "SPRINT_REPORT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .sprint-report.toml.
///
/// All sections are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Where the tracker keeps its custom fields
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Title prefixes and repository sets used for team inference
    #[serde(default)]
    pub teams: TeamConfig,

    /// Rendering knobs
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL used to link ticket keys, e.g. https://acme.atlassian.net/browse
    pub browse_url: Option<String>,
    pub flagged_field: String,
    pub points_field: String,
    pub development_field: String,
    pub branch_field: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            browse_url: None,
            flagged_field: "customfield_10021".to_string(),
            points_field: "customfield_10028".to_string(),
            development_field: "customfield_10000".to_string(),
            branch_field: "customfield_10097".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub frontend_prefixes: Vec<String>,
    pub backend_prefixes: Vec<String>,
    pub mobile_prefixes: Vec<String>,
    pub frontend_repos: Vec<String>,
    pub backend_repos: Vec<String>,
    pub mobile_repos: Vec<String>,
    pub translations_repos: Vec<String>,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            frontend_prefixes: strings(&["web ", "admin ", "[web", "[admin"]),
            backend_prefixes: strings(&["backend "]),
            mobile_prefixes: strings(&["mobile ", "[app", "[mobile", "[ios"]),
            frontend_repos: strings(&["humand-web", "humand-backoffice", "material-hu"]),
            backend_repos: strings(&["humand-main-api"]),
            mobile_repos: strings(&["humand-mobile"]),
            translations_repos: strings(&["hu-translations"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Organisational prefixes stripped from repository names on display
    pub repo_prefixes: Vec<String>,
    /// Rows of the repository breakdown, in display order
    pub breakdown_repos: Vec<String>,
    /// Max points delivery may trail elapsed time before it is reported
    pub lag_threshold: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            repo_prefixes: strings(&["humand-", "hu-"]),
            breakdown_repos: strings(&[
                "humand-main-api",
                "humand-web",
                "humand-mobile",
                "humand-backoffice",
                "material-hu",
                "hu-translations",
            ]),
            lag_threshold: 20,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path wins, then the SPRINT_REPORT_CONFIG env var, then
    /// .sprint-report.toml in the current directory. Only the implicit
    /// default file may be missing; it falls back to Config::default().
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_from(&PathBuf::from(path));
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}
