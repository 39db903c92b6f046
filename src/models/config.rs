use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the IBM Cloud API key
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable holding the Watson Studio project id
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "jobtrigger.toml";

/// Fully resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub platform: PlatformConfig,
}

impl Config {
    pub fn new(credentials: Credentials, platform: PlatformConfig) -> Self {
        Self {
            credentials,
            platform,
        }
    }
}

/// Secrets and scoping read from the environment
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub project_id: String,
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    ///
    /// Unset and blank variables are both reported as missing. Values are
    /// kept exactly as set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnvVar(name))
        };

        Ok(Self {
            api_key: require(API_KEY_VAR)?,
            project_id: require(PROJECT_ID_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[censored]")
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Endpoint and target settings, optionally loaded from jobtrigger.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformConfig {
    /// Watson Data API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// IAM token endpoint
    #[serde(default = "default_identity_url")]
    pub identity_url: String,
    /// Display name of the job to trigger
    #[serde(default = "default_job_name")]
    pub job_name: String,
    /// Per-request timeout in seconds. `None` means requests never time out.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            identity_url: default_identity_url(),
            job_name: default_job_name(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.dataplatform.cloud.ibm.com".to_string()
}

fn default_identity_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}

fn default_job_name() -> String {
    "Trial job - sample_loan_risk_pipeline_stage".to_string()
}

impl PlatformConfig {
    /// Merge CLI overrides into the settings
    pub fn with_overrides(
        mut self,
        job_name: Option<String>,
        base_url: Option<String>,
        identity_url: Option<String>,
        timeout: Option<u64>,
    ) -> Self {
        if let Some(name) = job_name {
            self.job_name = name;
        }
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(url) = identity_url {
            self.identity_url = url;
        }
        if let Some(t) = timeout {
            self.timeout_seconds = Some(t);
        }
        self
    }
}

/// Layout of jobtrigger.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub platform: PlatformConfig,
}

impl ConfigFile {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Try to load config from jobtrigger.toml in the given directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingEnvVar(&'static str),
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
}
