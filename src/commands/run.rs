use std::io::Write;
use tracing::info;

use crate::core::JobRunner;
use crate::error::JobTriggerError;
use crate::models::Config;

/// Identifiers produced by one trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub job_id: String,
    pub run_id: String,
}

/// Authenticate, resolve the configured job and start one run of it.
///
/// Each step aborts the sequence on failure, so a run is never submitted
/// without a resolved job.
pub async fn run_job<W: Write>(
    config: Config,
    out: &mut W,
) -> Result<TriggerOutcome, JobTriggerError> {
    let runner = JobRunner::new(config)?;
    info!(
        "Triggering job '{}' in project {}",
        runner.config().platform.job_name,
        runner.config().credentials.project_id
    );

    let access_token = runner.create_access_token().await?;

    let job_id = runner.retrieve_job_id(&access_token).await?;
    writeln!(out, "Found Job ID: {}", job_id)?;
    out.flush()?;

    let run = runner.run_pipeline_job(&job_id, &access_token).await?;
    let run_id = run.asset_id().to_string();
    writeln!(out, "Started pipeline job successfully. Run ID: {}", run_id)?;

    Ok(TriggerOutcome { job_id, run_id })
}
