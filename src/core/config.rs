use std::path::Path;
use tracing::info;

use crate::error::JobTriggerError;
use crate::models::{Config, ConfigFile, Credentials};

/// CLI overrides applied on top of jobtrigger.toml
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub job_name: Option<String>,
    pub base_url: Option<String>,
    pub identity_url: Option<String>,
    pub timeout: Option<u64>,
}

/// Resolve configuration from the environment, an optional jobtrigger.toml in
/// `dir`, and CLI overrides
pub fn load_config(dir: &Path, overrides: ConfigOverrides) -> Result<Config, JobTriggerError> {
    load_config_with(dir, overrides, Credentials::from_env)
}

/// Same as [`load_config`], with the credential source supplied by the caller
pub fn load_config_with<F>(
    dir: &Path,
    overrides: ConfigOverrides,
    credentials: F,
) -> Result<Config, JobTriggerError>
where
    F: FnOnce() -> Result<Credentials, crate::models::ConfigError>,
{
    let credentials = credentials()?;
    let platform = ConfigFile::load_from_dir(dir)?.platform.with_overrides(
        overrides.job_name,
        overrides.base_url,
        overrides.identity_url,
        overrides.timeout,
    );

    info!(
        "Configuration loaded: project={}, job='{}', api={}",
        credentials.project_id, platform.job_name, platform.base_url
    );

    Ok(Config::new(credentials, platform))
}
