mod auth;
mod cli;
mod definition;
mod init;
mod report;
mod run;
mod types;

pub mod prelude {
    pub use crate::auth::{
        acquire_token, fresh_username, login_body, register_body, AuthError, TEST_EMAIL,
        TEST_PASSWORD,
    };
    pub use crate::cli::{resolve_target, GaleScenarioCli, DEFAULT_TARGET};
    pub use crate::definition::{
        BodyGenerator, Cell, EndpointDefinition, ScenarioDefinition, SuiteDefinition,
        SuiteDefinitionBuilder,
    };
    pub use crate::init::init;
    pub use crate::run::{run, run_with, SuiteRun, SuiteState};
    pub use crate::types::GaleResult;
    pub use gale_generator::{
        GeneratorError, HttpLoadGenerator, LoadGenerator, LoadSpec,
    };
    pub use gale_report_model::{MetricsSnapshot, RunCategory, RunRecord};
}
