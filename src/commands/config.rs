use crate::Result;
use crate::facts::parse_base_url;
use crate::reports::ResolutionClasses;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "pagure-stats.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root URL of the Pagure instance
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Length of the time window in days
    #[serde(default = "default_days_ago")]
    pub days_ago: i64,

    /// Page size requested from the server
    #[serde(default)]
    pub per_page: Option<u8>,

    /// Resolutions counted as a positive outcome
    #[serde(default = "default_positive_resolutions")]
    pub positive_resolutions: Vec<String>,

    /// Resolutions counted as a negative outcome
    #[serde(default = "default_negative_resolutions")]
    pub negative_resolutions: Vec<String>,
}

fn default_base_url() -> String {
    "https://pagure.io/".to_string()
}

const fn default_days_ago() -> i64 {
    30
}

const POSITIVE_RESOLUTIONS: [&str; 5] = [
    "Fixed",
    "Fixed with Explanation",
    "Initiative Worthy",
    "It's all good",
    "To resubmit as CPE initiative",
];

const NEGATIVE_RESOLUTIONS: [&str; 9] = [
    "Invalid",
    "Will Not/Can Not fix",
    "Duplicate",
    "Upstream",
    "Insufficient data",
    "Spam",
    "Can't Fix",
    "Get back later",
    "Wrong tracker",
];

fn default_positive_resolutions() -> Vec<String> {
    POSITIVE_RESOLUTIONS.iter().map(ToString::to_string).collect()
}

fn default_negative_resolutions() -> Vec<String> {
    NEGATIVE_RESOLUTIONS.iter().map(ToString::to_string).collect()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The resolution groups used by reports.
    #[must_use]
    pub fn resolution_classes(&self) -> ResolutionClasses {
        ResolutionClasses::new(self.positive_resolutions.clone(), self.negative_resolutions.clone())
    }

    fn validate(&self) -> Result<()> {
        let _ = parse_base_url(&self.base_url)?;

        if self.days_ago <= 0 {
            return Err(app_err!("days_ago must be positive, got {}", self.days_ago));
        }

        if let Some(per_page) = self.per_page
            && !(1..=100).contains(&per_page)
        {
            return Err(app_err!("per_page must be between 1 and 100, got {per_page}"));
        }

        if let Some(label) = self.positive_resolutions.iter().find(|r| self.negative_resolutions.contains(r)) {
            return Err(app_err!("resolution '{label}' is listed as both positive and negative"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
