use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReportError, Result};

/// Filename used when the configuration does not name one.
pub const DEFAULT_OUTPUT_FILE: &str = "timesheet.xlsx";

/// Fixed per-entry duration estimate. The tracker records no real time
/// tracking, so every derived entry is booked at this many hours unless the
/// configuration overrides it.
pub const DEFAULT_HOURS_PER_ENTRY: f64 = 1.5;

/// Typed view of the TOML configuration file, validated at load time. Every
/// consumer receives it as an explicit parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tracker: TrackerConfig,
    pub report: ReportConfig,
}

/// Connection details for the tracker's REST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Instance base URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Account email used for Basic authentication.
    pub email: String,
    /// API token paired with the email.
    pub api_token: String,
}

/// Output and formatting knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Subdomain used to derive issue-browse hyperlinks.
    pub domain: String,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_hours_per_entry")]
    pub hours_per_entry: f64,
}

impl Settings {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&mut self) -> Result<()> {
        require("tracker.base_url", &self.tracker.base_url)?;
        require("tracker.email", &self.tracker.email)?;
        require("tracker.api_token", &self.tracker.api_token)?;
        require("report.domain", &self.report.domain)?;
        if self.report.hours_per_entry < 0.0 {
            return Err(ReportError::InvalidConfig {
                field: "report.hours_per_entry",
                reason: "must be non-negative".into(),
            });
        }
        while self.tracker.base_url.ends_with('/') {
            self.tracker.base_url.pop();
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::InvalidConfig {
            field,
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_hours_per_entry() -> f64 {
    DEFAULT_HOURS_PER_ENTRY
}
