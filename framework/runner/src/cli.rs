use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_TARGET: &str = "http://localhost:3001";
pub const API_URL_ENV: &str = "API_URL";

#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct GaleScenarioCli {
    /// Base URL of the service to test. Overrides the API_URL environment
    /// variable.
    #[clap(short, long)]
    pub target: Option<String>,

    /// Directory the run records are persisted to
    #[clap(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// Seconds to pause between matrix cells so prior connections can drain
    #[clap(long)]
    pub cooldown: Option<u64>,

    /// Override the duration of every scenario in the suite, in seconds
    #[clap(long)]
    pub duration: Option<u64>,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't
    /// being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,
}

impl Default for GaleScenarioCli {
    fn default() -> Self {
        Self {
            target: None,
            results_dir: PathBuf::from("results"),
            cooldown: None,
            duration: None,
            no_progress: true,
        }
    }
}

/// Resolve the target base URL: explicit flag, then `API_URL`, then the
/// default local Conduit port.
pub fn resolve_target(cli: &GaleScenarioCli) -> String {
    cli.target
        .clone()
        .or_else(|| std::env::var(API_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_TARGET.to_string())
        .trim_end_matches('/')
        .to_string()
}
