use anyhow::Context;
use chrono::Utc;
use gale_report_model::ResultsArchive;
use gale_summariser::model::Report;
use gale_summariser::{analyze, print_report};
use std::fs::File;
use std::path::PathBuf;

/// Environment variable name to set a custom results directory
const RESULTS_DIR_ENV: &str = "RESULTS_DIR";
/// Default directory the suites persist into
const DEFAULT_RESULTS_DIR: &str = "results";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let results_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var(RESULTS_DIR_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));
    log::debug!("Loading results from {}", results_dir.display());

    let archive = ResultsArchive::load(&results_dir)
        .with_context(|| format!("Failed to load results from {}", results_dir.display()))?;
    log::info!("Loaded {} run records", archive.len());

    let report = analyze(&archive);
    print_report(&report);

    if let Report::Analysis(_) = &report {
        let path = format!(
            "gale-report-{}.json",
            Utc::now().format("%Y-%m-%dT%H.%M.%S%.fZ")
        );
        let file = File::create_new(&path)?;
        serde_json::to_writer_pretty(file, &report)?;
        log::info!("Wrote {path}");
    }

    Ok(())
}
