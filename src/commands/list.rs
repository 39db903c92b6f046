use std::io::Write;

use crate::core::{JobRunner, JOB_LIST_LIMIT};
use crate::error::JobTriggerError;
use crate::models::Config;

/// Print the jobs visible in the project, one per line. Returns how many were listed.
pub async fn list_jobs<W: Write>(config: Config, out: &mut W) -> Result<usize, JobTriggerError> {
    let runner = JobRunner::new(config)?;
    let access_token = runner.create_access_token().await?;
    let listing = runner.list_jobs(&access_token).await?;

    for job in &listing.results {
        writeln!(out, "{}  {}", job.metadata.asset_id, job.metadata.name)?;
    }
    writeln!(out, "{} job(s) listed", listing.len())?;

    if let Some(total) = listing.total_rows {
        if total > listing.len() as u64 {
            writeln!(
                out,
                "Note: project has {} jobs, only the first {} are shown",
                total, JOB_LIST_LIMIT
            )?;
        }
    }

    Ok(listing.len())
}
