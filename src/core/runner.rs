use chrono::Local;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ApiError, JobTriggerError, Result};
use crate::models::{
    AccessToken, Config, JobListing, JobRun, JobRunRequest, TokenResponse, APIKEY_GRANT_TYPE,
};

/// Page size of the job listing. Jobs past the first page are not seen.
pub const JOB_LIST_LIMIT: u32 = 100;

/// Drives the authenticate, resolve and trigger sequence against the
/// IBM Cloud IAM and Watson Data APIs
pub struct JobRunner {
    client: Client,
    config: Config,
}

impl JobRunner {
    /// Create a runner for the given configuration.
    ///
    /// Requests only time out when `timeout_seconds` is configured.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.platform.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Exchange the API key for a bearer token
    pub async fn create_access_token(&self) -> Result<AccessToken> {
        let url = &self.config.platform.identity_url;
        debug!("Requesting access token from {}", url);

        let request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", APIKEY_GRANT_TYPE),
                ("apikey", self.config.credentials.api_key.as_str()),
            ]);

        let response: TokenResponse = self.execute(request, url).await?;
        info!("Access token obtained");
        Ok(AccessToken::from(response))
    }

    /// Fetch the first page of jobs in the configured project
    pub async fn list_jobs(&self, access_token: &AccessToken) -> Result<JobListing> {
        let url = format!("{}/v2/jobs", self.base_url());
        let limit = JOB_LIST_LIMIT.to_string();
        debug!(
            "Listing jobs: {} (project_id={}, limit={})",
            url, self.config.credentials.project_id, limit
        );

        let request = self
            .client
            .get(&url)
            .bearer_auth(access_token.as_str())
            .query(&[
                ("project_id", self.config.credentials.project_id.as_str()),
                ("limit", limit.as_str()),
                ("userfs", "false"),
            ]);

        let listing: JobListing = self.execute(request, &url).await?;
        debug!("Listing returned {} job(s)", listing.len());
        Ok(listing)
    }

    /// Resolve the asset id of the configured job.
    ///
    /// When several jobs share the name, the last one listed wins.
    pub async fn retrieve_job_id(&self, access_token: &AccessToken) -> Result<String> {
        let job_name = &self.config.platform.job_name;
        let listing = self.list_jobs(access_token).await?;

        let job = listing
            .last_matching(job_name)
            .ok_or_else(|| JobTriggerError::JobNotFound(job_name.clone()))?;

        info!("Resolved job '{}' to {}", job_name, job.metadata.asset_id);
        Ok(job.metadata.asset_id.clone())
    }

    /// Submit a run of the given job, named after today's date
    pub async fn run_pipeline_job(
        &self,
        job_id: &str,
        access_token: &AccessToken,
    ) -> Result<JobRun> {
        let url = format!("{}/v2/jobs/{}/runs", self.base_url(), job_id);
        let payload = JobRunRequest::for_date(Local::now().date_naive());
        debug!("Submitting run '{}' to {}", payload.job_run.name, url);

        let request = self
            .client
            .post(&url)
            .bearer_auth(access_token.as_str())
            .header(ACCEPT, "application/json")
            .query(&[
                ("project_id", self.config.credentials.project_id.as_str()),
                ("userfs", "false"),
            ])
            .json(&payload);

        let run: JobRun = self.execute(request, &url).await?;
        info!("Job run created: {}", run.asset_id());
        Ok(run)
    }

    fn base_url(&self) -> &str {
        self.config.platform.base_url.trim_end_matches('/')
    }

    fn transport_error(&self, err: reqwest::Error, url: &str) -> ApiError {
        if err.is_connect() {
            ApiError::ConnectionRefused(format!("Could not connect to {}", url))
        } else if err.is_timeout() {
            ApiError::Timeout(self.config.platform.timeout_seconds.unwrap_or_default())
        } else {
            ApiError::from(err)
        }
    }

    /// Send a request, fail on any non-2xx status and decode the JSON body
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> std::result::Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e, url))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpError { status, message });
        }

        // The client timeout also covers reading the body
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, url))?;
        serde_json::from_str(&body).map_err(|e| {
            let excerpt: String = body.chars().take(200).collect();
            ApiError::ParseError(format!("{} - {}", excerpt, e))
        })
    }
}
