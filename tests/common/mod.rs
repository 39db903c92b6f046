//! Common test utilities

#![allow(dead_code)]

use httptest::Server;
use jobtrigger::models::{Config, Credentials, PlatformConfig};
use serde_json::{json, Value};

pub const TOKEN_PATH: &str = "/identity/token";

/// Configuration pointing both the IAM and data platform endpoints at `server`
pub fn config_for(server: &Server, job_name: &str) -> Config {
    Config::new(
        Credentials {
            api_key: "k".to_string(),
            project_id: "p".to_string(),
        },
        PlatformConfig {
            base_url: server.url("/").to_string(),
            identity_url: server.url(TOKEN_PATH).to_string(),
            job_name: job_name.to_string(),
            timeout_seconds: Some(10),
        },
    )
}

/// IAM token endpoint response carrying `token`
pub fn token_body(token: &str) -> Value {
    json!({
        "access_token": token,
        "refresh_token": "not_supported",
        "token_type": "Bearer",
        "expires_in": 3600,
        "expiration": 1_700_003_600
    })
}

/// Job listing response with one record per (name, asset_id) pair, in order
pub fn listing_body(jobs: &[(&str, &str)]) -> Value {
    let results: Vec<Value> = jobs
        .iter()
        .map(|(name, asset_id)| {
            json!({
                "metadata": {
                    "name": name,
                    "asset_id": asset_id,
                    "asset_type": "job"
                },
                "entity": { "job": { "asset_ref": "pipeline-1" } }
            })
        })
        .collect();

    json!({ "total_rows": jobs.len(), "results": results })
}

/// Run submission response carrying `run_id`
pub fn run_body(run_id: &str) -> Value {
    json!({ "metadata": { "asset_id": run_id } })
}
