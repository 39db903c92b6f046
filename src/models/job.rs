use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description attached to every run created by this tool
pub const RUN_DESCRIPTION: &str = "Triggered via API";

/// Grant type for exchanging an IBM Cloud API key at the IAM endpoint
pub const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Response body of the IAM token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Bearer token for the data platform API.
///
/// Obtained once per invocation; expiry is not tracked.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([censored])")
    }
}

impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        Self(response.access_token)
    }
}

/// One page of `GET /v2/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub total_rows: Option<u64>,
    #[serde(default)]
    pub results: Vec<JobRecord>,
}

impl JobListing {
    /// Last record whose display name equals `name` exactly.
    ///
    /// Listing order comes from the server and is not documented, so which of
    /// several same-named jobs wins is only as stable as that order.
    pub fn last_matching(&self, name: &str) -> Option<&JobRecord> {
        self.results.iter().rev().find(|job| job.metadata.name == name)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A job as returned in a listing
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    pub metadata: JobMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobMetadata {
    pub name: String,
    pub asset_id: String,
}

/// Body of `POST /v2/jobs/{job_id}/runs`
#[derive(Debug, Clone, Serialize)]
pub struct JobRunRequest {
    pub job_run: JobRunSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRunSpec {
    pub name: String,
    pub description: String,
}

impl JobRunRequest {
    /// Run request named after the given day, e.g. `API_Run_2024-05-01`
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            job_run: JobRunSpec {
                name: format!("API_Run_{}", date.format("%Y-%m-%d")),
                description: RUN_DESCRIPTION.to_string(),
            },
        }
    }
}

/// Response of a run submission
#[derive(Debug, Clone, Deserialize)]
pub struct JobRun {
    pub metadata: JobRunMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobRunMetadata {
    pub asset_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl JobRun {
    pub fn asset_id(&self) -> &str {
        &self.metadata.asset_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(jobs: &[(&str, &str)]) -> JobListing {
        JobListing {
            total_rows: Some(jobs.len() as u64),
            results: jobs
                .iter()
                .map(|(name, id)| JobRecord {
                    metadata: JobMetadata {
                        name: name.to_string(),
                        asset_id: id.to_string(),
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{"access_token":"T","refresh_token":"not_supported","token_type":"Bearer","expires_in":3600,"expiration":1700000000}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "T");
        assert_eq!(response.expires_in, Some(3600));

        let token = AccessToken::from(response);
        assert_eq!(token.as_str(), "T");
    }

    #[test]
    fn test_access_token_debug_is_censored() {
        let token = AccessToken::new("eyJraWQiOi");
        assert_eq!(format!("{:?}", token), "AccessToken([censored])");
    }

    #[test]
    fn test_last_matching_prefers_last() {
        let jobs = listing(&[("A", "1"), ("B", "2"), ("A", "3")]);
        let found = jobs.last_matching("A").unwrap();
        assert_eq!(found.metadata.asset_id, "3");
        assert_eq!(jobs.last_matching("B").unwrap().metadata.asset_id, "2");
    }

    #[test]
    fn test_last_matching_is_exact() {
        let jobs = listing(&[("A job", "1"), ("a", "2")]);
        assert!(jobs.last_matching("A").is_none());
        assert!(jobs.last_matching("X").is_none());
        assert!(listing(&[]).last_matching("A").is_none());
    }

    #[test]
    fn test_listing_deserialization() {
        let json = r#"{
            "total_rows": 2,
            "results": [
                {"metadata": {"name": "A", "asset_id": "1", "owner_id": "IBMid-1"}, "entity": {"job": {}}},
                {"metadata": {"name": "B", "asset_id": "2"}}
            ]
        }"#;
        let jobs: JobListing = serde_json::from_str(json).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs.results[0].metadata.name, "A");
        assert_eq!(jobs.results[1].metadata.asset_id, "2");
    }

    #[test]
    fn test_listing_without_results() {
        let jobs: JobListing = serde_json::from_str(r#"{"total_rows":0}"#).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_run_request_serialization() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let request = JobRunRequest::for_date(date);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "job_run": {
                    "name": "API_Run_2024-05-01",
                    "description": "Triggered via API"
                }
            })
        );
    }

    #[test]
    fn test_job_run_deserialization() {
        let json = r#"{"metadata":{"asset_id":"run-99","name":"API_Run_2024-05-01"},"entity":{"job_run":{"state":"Starting"}}}"#;
        let run: JobRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.asset_id(), "run-99");
        assert_eq!(run.metadata.name.as_deref(), Some("API_Run_2024-05-01"));
    }

    #[test]
    fn test_job_run_missing_asset_id() {
        let result: Result<JobRun, _> = serde_json::from_str(r#"{"metadata":{}}"#);
        assert!(result.is_err());
    }
}
