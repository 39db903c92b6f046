use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use jobtrigger::commands::{list_jobs, run_job};
use jobtrigger::core::{load_config, ConfigOverrides};
use jobtrigger::JobTriggerError;

/// jobtrigger - start a Watson Studio pipeline job through the Watson Data API
///
/// Reads API_KEY and PROJECT_ID from the environment.
#[derive(Parser)]
#[command(name = "jobtrigger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Display name of the job to trigger
    #[arg(long, global = true)]
    job_name: Option<String>,

    /// Override the Watson Data API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the IAM token endpoint
    #[arg(long, global = true)]
    identity_url: Option<String>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger a run of the configured job (default)
    Run,

    /// List the jobs visible in the project
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr, report lines to stdout
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> Result<(), JobTriggerError> {
    let project_root = std::env::current_dir()?;
    let overrides = ConfigOverrides {
        job_name: cli.job_name,
        base_url: cli.base_url,
        identity_url: cli.identity_url,
        timeout: cli.timeout,
    };
    let config = load_config(&project_root, overrides)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_job(config, &mut stdout).await.map(|_| ()),
        Commands::List => list_jobs(config, &mut stdout).await.map(|_| ()),
    }
}
