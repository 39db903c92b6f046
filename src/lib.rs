//! jobtrigger - start a Watson Studio pipeline job from the command line
//!
//! jobtrigger exchanges an IBM Cloud API key for an IAM bearer token, looks up a
//! job by display name in a Watson Studio project and submits one run of it
//! through the Watson Data API.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (run, list)
//! - **core**: The job runner and configuration resolution
//! - **models**: Data structures (config, API payloads)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{ApiError, JobTriggerError, Result};
