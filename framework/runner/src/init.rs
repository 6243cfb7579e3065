use crate::cli::GaleScenarioCli;
use clap::Parser;

/// Initialise logging and the CLI for a suite binary.
pub fn init() -> GaleScenarioCli {
    env_logger::init();

    GaleScenarioCli::parse()
}
