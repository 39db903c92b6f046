pub mod config;
pub mod runner;

pub use config::*;
pub use runner::*;
